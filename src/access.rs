//! Album thumbnail gate.
//!
//! Protected albums can hide their real thumbnail behind a lock image. The
//! gate only decides which of the two to render; authentication and rights
//! checks belong to the [`Album`] implementation supplied by the platform.

use crate::types::ImageRef;

/// An album as exposed by the gallery platform.
pub trait Album {
    /// Whether the album is published.
    fn is_visible(&self) -> bool;

    /// The album password, empty when unprotected.
    fn password(&self) -> &str;

    /// Whether the current viewer holds list rights on the album.
    fn has_list_rights(&self) -> bool;

    /// The image used as the album's thumbnail.
    fn thumb_image(&self) -> ImageRef;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the real thumbnail.
    Allow,
    /// Render the lock placeholder.
    Deny,
}

/// Deny iff the lock image is enabled, the album has a password, and the
/// viewer lacks list rights.
pub fn gate<A: Album + ?Sized>(album: &A, use_lock_image: bool) -> GateDecision {
    if use_lock_image && !album.password().is_empty() && !album.has_list_rights() {
        GateDecision::Deny
    } else {
        GateDecision::Allow
    }
}

/// The caller's class with `not_visible` / `password_protected` appended.
///
/// These flags are cosmetic and independent of the gate decision. Returns
/// `None` when the result is empty.
pub fn album_thumb_class<A: Album + ?Sized>(class: Option<&str>, album: &A) -> Option<String> {
    let mut classes: Vec<&str> = class.map(str::trim).into_iter().collect();
    if !album.is_visible() {
        classes.push("not_visible");
    }
    if !album.password().is_empty() {
        classes.push("password_protected");
    }
    let joined = classes.join(" ");
    let trimmed = joined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockAlbum;

    #[test]
    fn protected_album_without_rights_is_denied() {
        let album = MockAlbum::new().password("x");
        assert_eq!(gate(&album, true), GateDecision::Deny);
    }

    #[test]
    fn protected_album_with_rights_is_allowed() {
        let album = MockAlbum::new().password("x").list_rights(true);
        assert_eq!(gate(&album, true), GateDecision::Allow);
    }

    #[test]
    fn gate_truth_table() {
        for use_lock in [false, true] {
            for password in ["", "x"] {
                for rights in [false, true] {
                    let album = MockAlbum::new().password(password).list_rights(rights);
                    let expected = if use_lock && !password.is_empty() && !rights {
                        GateDecision::Deny
                    } else {
                        GateDecision::Allow
                    };
                    assert_eq!(
                        gate(&album, use_lock),
                        expected,
                        "use_lock={use_lock} password={password:?} rights={rights}"
                    );
                }
            }
        }
    }

    #[test]
    fn gate_ignores_visibility() {
        let album = MockAlbum::new().hidden();
        assert_eq!(gate(&album, true), GateDecision::Allow);
    }

    #[test]
    fn class_flags_for_hidden_protected_album() {
        let album = MockAlbum::new().hidden().password("x");
        assert_eq!(
            album_thumb_class(Some("thumb"), &album).as_deref(),
            Some("thumb not_visible password_protected")
        );
    }

    #[test]
    fn class_flags_without_base_class() {
        let album = MockAlbum::new().password("x");
        assert_eq!(
            album_thumb_class(None, &album).as_deref(),
            Some("password_protected")
        );
        assert_eq!(album_thumb_class(None, &MockAlbum::new()), None);
        assert_eq!(album_thumb_class(Some("  "), &MockAlbum::new()), None);
    }

    #[test]
    fn works_through_trait_object() {
        let album = MockAlbum::new().password("x");
        let dynamic: &dyn Album = &album;
        assert_eq!(gate(dynamic, true), GateDecision::Deny);
    }
}
