use anyhow::Context;

/// Somewhere plain text can be copied to.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()>;
}

/// System clipboard backed by `arboard`. The handle is opened on first use so
/// headless sessions only fail when a copy is attempted.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        if self.inner.is_none() {
            let cb = arboard::Clipboard::new().context("failed to open system clipboard")?;
            self.inner = Some(cb);
        }
        if let Some(cb) = self.inner.as_mut() {
            cb.set_text(text.to_string())
                .context("failed to write to clipboard")?;
        }
        Ok(())
    }
}

/// Captures copied text in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
