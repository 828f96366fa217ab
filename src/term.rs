//! Terminal utilities

use crate::Result;
use log::debug;
use nix::libc;
use std::os::unix::io::RawFd;

/// Set raw mode on a terminal file descriptor
///
/// Raw mode delivers keys immediately and without echo, so menu
/// selections take effect on a single keypress.
pub fn set_raw_mode(fd: RawFd) -> Result<libc::termios> {
    let original_termios = unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        termios
    };

    let mut raw_termios = original_termios;

    unsafe {
        libc::cfmakeraw(&mut raw_termios);
        libc::tcsetattr(fd, libc::TCSANOW, &raw_termios);
    }

    Ok(original_termios)
}

/// Restore terminal attributes
///
/// Called on exit to return the terminal to normal state
pub fn restore_termios(fd: RawFd, termios: &libc::termios) {
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, termios);
    }
}

/// RAII guard restoring the terminal on exit
///
/// Ensures the terminal always returns to normal mode even on a crash
pub struct TermiosGuard {
    fd: RawFd,
    termios: libc::termios,
}

impl TermiosGuard {
    pub fn new(fd: RawFd, termios: libc::termios) -> Self {
        Self { fd, termios }
    }
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        restore_termios(self.fd, &self.termios);
        debug!("Terminal attributes restored");
    }
}
