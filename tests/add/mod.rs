mod add_files_from_nested_directories;
mod concurrent_add_operations;
