use core::fmt;
use core::str;

use crate::MAX_TRACELOG_BUFFER_SIZE;

/// Fixed-capacity render buffer for one trace message.
///
/// The backing storage starts zeroed and writes never touch the final byte,
/// so `buf[len]` is always a NUL and the content can be handed to a C
/// handler as-is. Writing past `MAX_TRACELOG_BUFFER_SIZE - 1` bytes of text
/// truncates silently, cutting only at a character boundary so the stored
/// text stays valid UTF-8.
pub struct MsgBuffer {
    buf: [u8; MAX_TRACELOG_BUFFER_SIZE],
    len: usize,
}

impl MsgBuffer {
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_TRACELOG_BUFFER_SIZE],
            len: 0,
        }
    }

    /// Bytes of rendered text, terminator excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn as_text(&self) -> &str {
        // Writes only ever copy whole characters.
        unsafe { str::from_utf8_unchecked(self.as_bytes()) }
    }

    /// Pointer to the NUL-terminated text, for handing across the C
    /// boundary. Valid as long as the buffer is.
    pub fn as_ptr(&self) -> *const cty::c_char {
        self.buf.as_ptr() as *const cty::c_char
    }

    fn push_str(&mut self, s: &str) {
        let remaining = MAX_TRACELOG_BUFFER_SIZE - 1 - self.len;
        let mut take = s.len().min(remaining);
        while take > 0 && !s.is_char_boundary(take) {
            take -= 1;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
    }
}

impl Default for MsgBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for MsgBuffer {
    /// Truncating writer: overflow is dropped, never reported as an error.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}
