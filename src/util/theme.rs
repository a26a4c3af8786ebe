//! Theme preference: stored in `localStorage`, applied as a `.dark` class on
//! the document element. Falls back to the system preference when the user
//! has not chosen. Requires a browser environment.

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "bitacora-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Resolve the active theme: stored choice first, system preference second.
pub fn read_preference() -> Theme {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return Theme::Light;
        };

        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(stored)) = storage.get_item(STORAGE_KEY) {
                return if stored == "dark" { Theme::Dark } else { Theme::Light };
            }
        }

        let system_dark = window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches());
        if system_dark { Theme::Dark } else { Theme::Light }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Theme::Light
    }
}

/// Sync the `.dark` class on `<html>` with the given theme.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let class_list = el.class_list();
            if theme.is_dark() {
                let _ = class_list.add_1("dark");
            } else {
                let _ = class_list.remove_1("dark");
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = theme;
    }
}

/// Switch theme, apply it, and persist the choice.
pub fn toggle(current: Theme) -> Theme {
    let next = current.flipped();
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(Some(storage)) = window.local_storage() {
                let _ =
                    storage.set_item(STORAGE_KEY, if next.is_dark() { "dark" } else { "light" });
            }
        }
    }
    next
}
