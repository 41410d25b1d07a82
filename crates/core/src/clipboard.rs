use anyhow::Result;

/// System clipboard capability. Injected into the controller when available.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<()>;
}
