use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit::Theme;
use palette::Srgba;
use strum::IntoEnumIterator;

pub fn set_source(cr: &cairo::Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Swaps the theme class on the window; every styled descendant follows.
pub fn apply_theme(window: &gtk::ApplicationWindow, theme: Theme) {
    for other in Theme::iter().filter(|t| *t != theme) {
        window.remove_css_class(other.css_class());
    }
    window.add_css_class(theme.css_class());
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
window.folio-dark, window.folio-dark .folio-page {
    background-color: #000000;
    color: #ffffff;
}
window.folio-light, window.folio-light .folio-page {
    background-color: #ffffff;
    color: #111827;
}
.folio-heading {
    font-size: 24pt;
    font-weight: bold;
}
.folio-dark .orbit-title { color: #d1d5db; }
.folio-light .orbit-title { color: #374151; }
.orbit-title {
    font-size: 16pt;
    font-weight: 600;
}
.orbit-area {
    background: none;
    background-color: transparent;
}
.contact-eyebrow {
    font-size: 9pt;
    letter-spacing: 1px;
    color: #9ca3af;
}
.contact-title {
    font-size: 30pt;
    font-weight: bold;
}
.contact-field entry, .contact-field textview {
    border-radius: 0;
    border-bottom: 1px solid #4b5563;
}
.contact-status.success { color: #4ade80; }
.contact-status.error { color: #f87171; }
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
