//! Post-processing hooks keyed by output kind.
//!
//! Every rendered `<picture>` passes through the hooks registered for its
//! [`OutputKind`], in registration order. Kinds without hooks pass the markup
//! through unchanged. The legacy hook names are kept on the kind for callers
//! bridging to a platform that dispatches by name.

use std::collections::HashMap;

/// What a rendered fragment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputKind {
    /// Custom-sized image. Also used for static theme images.
    #[default]
    CustomImage,
    /// Custom-sized image treated as a thumbnail.
    CustomImageThumb,
    /// Custom-sized album thumbnail.
    CustomAlbumThumb,
    /// Default sized image.
    StandardImage,
    /// Default thumbnail.
    StandardImageThumb,
    /// Default album thumbnail.
    StandardAlbumThumb,
}

impl OutputKind {
    pub const ALL: [OutputKind; 6] = [
        OutputKind::CustomImage,
        OutputKind::CustomImageThumb,
        OutputKind::CustomAlbumThumb,
        OutputKind::StandardImage,
        OutputKind::StandardImageThumb,
        OutputKind::StandardAlbumThumb,
    ];

    /// Name of the platform filter this kind corresponds to.
    ///
    /// Custom images and custom thumbs share `custom_image_html`; the two are
    /// told apart by [`is_thumb`](Self::is_thumb).
    pub fn hook_name(self) -> &'static str {
        match self {
            OutputKind::CustomImage | OutputKind::CustomImageThumb => "custom_image_html",
            OutputKind::CustomAlbumThumb => "custom_album_thumb_html",
            OutputKind::StandardImage => "standard_image_html",
            OutputKind::StandardImageThumb => "standard_image_thumb_html",
            OutputKind::StandardAlbumThumb => "standard_album_thumb_html",
        }
    }

    pub fn is_thumb(self) -> bool {
        !matches!(self, OutputKind::CustomImage | OutputKind::StandardImage)
    }
}

/// A post-processing function. Receives the markup and the kind it was rendered as.
pub type HtmlHook = Box<dyn Fn(String, OutputKind) -> String + Send + Sync>;

/// Registered hooks per output kind.
#[derive(Default)]
pub struct HtmlHooks {
    table: HashMap<OutputKind, Vec<HtmlHook>>,
}

impl HtmlHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook for one kind. Hooks run in registration order.
    pub fn register<F>(&mut self, kind: OutputKind, hook: F) -> &mut Self
    where
        F: Fn(String, OutputKind) -> String + Send + Sync + 'static,
    {
        self.table.entry(kind).or_default().push(Box::new(hook));
        self
    }

    /// Number of hooks registered for `kind`.
    pub fn count(&self, kind: OutputKind) -> usize {
        self.table.get(&kind).map_or(0, Vec::len)
    }

    /// Run every hook for `kind` over `html`.
    pub fn apply(&self, kind: OutputKind, html: String) -> String {
        match self.table.get(&kind) {
            Some(hooks) => hooks.iter().fold(html, |acc, hook| hook(acc, kind)),
            None => html,
        }
    }
}

impl std::fmt::Debug for HtmlHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<(OutputKind, usize)> = OutputKind::ALL
            .iter()
            .map(|&kind| (kind, self.count(kind)))
            .filter(|(_, n)| *n > 0)
            .collect();
        counts.sort_by_key(|(kind, _)| kind.hook_name());
        f.debug_struct("HtmlHooks").field("hooks", &counts).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unregistered_kind_passes_through() {
        let hooks = HtmlHooks::new();
        let html = hooks.apply(OutputKind::StandardImage, "<picture></picture>".to_string());
        assert_eq!(html, "<picture></picture>");
    }

    #[test]
    fn hooks_run_in_registration_order() {
        let mut hooks = HtmlHooks::new();
        hooks
            .register(OutputKind::StandardImage, |html, _| format!("<a>{html}</a>"))
            .register(OutputKind::StandardImage, |html, _| format!("<div>{html}</div>"));

        let html = hooks.apply(OutputKind::StandardImage, "x".to_string());
        assert_eq!(html, "<div><a>x</a></div>");
    }

    #[test]
    fn hooks_only_run_for_their_kind() {
        let mut hooks = HtmlHooks::new();
        hooks.register(OutputKind::StandardAlbumThumb, |_, _| "replaced".to_string());

        assert_eq!(hooks.apply(OutputKind::StandardImageThumb, "x".into()), "x");
        assert_eq!(hooks.apply(OutputKind::StandardAlbumThumb, "x".into()), "replaced");
        assert_eq!(hooks.count(OutputKind::StandardAlbumThumb), 1);
        assert_eq!(hooks.count(OutputKind::CustomImage), 0);
    }

    #[test]
    fn hook_receives_kind() {
        let mut hooks = HtmlHooks::new();
        hooks.register(OutputKind::CustomImageThumb, |html, kind| {
            format!("{html}:{}:{}", kind.hook_name(), kind.is_thumb())
        });

        let html = hooks.apply(OutputKind::CustomImageThumb, "x".into());
        assert_eq!(html, "x:custom_image_html:true");
    }

    #[test]
    fn custom_image_kinds_share_hook_name() {
        assert_eq!(
            OutputKind::CustomImage.hook_name(),
            OutputKind::CustomImageThumb.hook_name()
        );
        assert!(!OutputKind::CustomImage.is_thumb());
        assert!(!OutputKind::StandardImage.is_thumb());
        assert!(OutputKind::StandardAlbumThumb.is_thumb());
    }
}
