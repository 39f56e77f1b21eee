//! Shared output plumbing
//!
//! Long command output (`log`) is routed through the minus pager when stdout
//! is a terminal.

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable that disables the pager when set
pub const NO_PAGER_ENV: &str = "NO_PAGER";

/// `Write` adapter over a minus pager
///
/// ```ignore
/// let pager = Pager::new();
/// let writer = PagerWriter::new(pager.clone());
/// let repository = Repository::discover(&cwd, Box::new(writer))?;
/// repository.log(&options)?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Whether output should be paged: stdout is a terminal and `NO_PAGER` is unset
pub fn should_page() -> bool {
    use is_terminal::IsTerminal;

    std::env::var_os(NO_PAGER_ENV).is_none() && io::stdout().is_terminal()
}
