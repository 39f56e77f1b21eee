mod init_repository_successfully;
mod init_twice_fails_with_already_initialized;
