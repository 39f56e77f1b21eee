mod branch_switch_keeps_histories_apart;
mod checkout_unknown_branch;
