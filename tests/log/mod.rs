mod show_multiple_commits_in_medium_format;
