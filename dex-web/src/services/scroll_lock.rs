//! Background scroll lock for modal overlays.

use shared::overlay::ScrollLock;

/// Freezes page scrolling by setting `overflow: hidden` on `<body>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyScrollLock;

impl BodyScrollLock {
    fn set_overflow(value: &str) {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            log::warn!("No document body; scroll lock skipped");
            return;
        };

        let style = body.style();
        let result = if value.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", value)
        };
        if let Err(e) = result {
            log::error!("Failed to update body overflow: {:?}", e);
        }
    }
}

impl ScrollLock for BodyScrollLock {
    fn lock(&self) {
        Self::set_overflow("hidden");
    }

    fn unlock(&self) {
        Self::set_overflow("");
    }
}
