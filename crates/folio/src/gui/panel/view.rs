use super::model::PanelState;
use super::{
    CENTER_FILL_ALPHA, CENTER_GLYPH, CENTER_RADIUS, GLOW_ALPHA, GLOW_SPREAD, HOVER_GLOW_ALPHA,
    HOVER_GLOW_SPREAD, HOVER_SCALE, ICON_FILL_FACTOR, MARKER_BORDER_WIDTH, RING_BORDER_ALPHA,
    TOOLTIP_ARROW, TOOLTIP_GAP, TOOLTIP_PADDING_X, TOOLTIP_PADDING_Y,
};
use crate::gui::icon::ICON_SIZE;
use crate::gui::theme::set_source;
use cairo::{Context, FontSlant, FontWeight, RadialGradient};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use orbit::{HexColor, ItemVisual, Marker, Palette, Point};
use std::f64::consts::PI;

struct MarkerRenderer<'a> {
    marker: &'a Marker,
    visual: &'a ItemVisual,
    pixbuf: Option<&'a Pixbuf>,
    radius: f64,
    hovered: bool,
}

impl<'a> MarkerRenderer<'a> {
    fn draw(&self, cr: &Context, palette: &Palette) -> Result<(), cairo::Error> {
        let Point { x, y } = self.marker.center;
        let radius = if self.hovered {
            self.radius * HOVER_SCALE
        } else {
            self.radius
        };

        self.draw_glow(cr, x, y, radius)?;

        cr.arc(x, y, radius, 0.0, 2.0 * PI);
        set_source(cr, palette.marker_background);
        cr.fill_preserve()?;
        let border = if self.hovered {
            self.visual.color.opaque()
        } else {
            palette.marker_border
        };
        set_source(cr, border);
        cr.set_line_width(MARKER_BORDER_WIDTH);
        cr.stroke()?;

        // content turns with the ring
        cr.save()?;
        cr.translate(x, y);
        cr.rotate(self.marker.phase_degrees.to_radians());
        match self.pixbuf {
            Some(pixbuf) => self.draw_icon(cr, pixbuf, radius)?,
            None => self.draw_glyph(cr, radius)?,
        }
        cr.restore()
    }

    fn draw_glow(&self, cr: &Context, x: f64, y: f64, radius: f64) -> Result<(), cairo::Error> {
        let (alpha, spread) = if self.hovered {
            (HOVER_GLOW_ALPHA, HOVER_GLOW_SPREAD)
        } else {
            (GLOW_ALPHA, GLOW_SPREAD)
        };
        let (r, g, b, a) = self.visual.color.with_alpha(alpha).into_components();

        let glow = RadialGradient::new(x, y, radius, x, y, radius + spread / 2.0);
        glow.add_color_stop_rgba(0.0, r, g, b, a);
        glow.add_color_stop_rgba(1.0, r, g, b, 0.0);
        cr.set_source(&glow)?;
        cr.arc(x, y, radius + spread / 2.0, 0.0, 2.0 * PI);
        cr.fill()
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf, radius: f64) -> Result<(), cairo::Error> {
        let icon_scale = (radius * 2.0 * ICON_FILL_FACTOR) / ICON_SIZE as f64;
        let (iw, ih) = (
            pixbuf.width() as f64 * icon_scale,
            pixbuf.height() as f64 * icon_scale,
        );

        cr.save()?;
        cr.translate(-iw / 2.0, -ih / 2.0);
        cr.scale(icon_scale, icon_scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_glyph(&self, cr: &Context, radius: f64) -> Result<(), cairo::Error> {
        set_source(cr, self.visual.color.opaque());
        cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Bold);
        cr.set_font_size(radius * 0.7);
        show_centered(cr, &self.visual.glyph, 0.0, 0.0)
    }
}

fn show_centered(cr: &Context, text: &str, x: f64, y: f64) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(
        x - ext.width() / 2.0 - ext.x_bearing(),
        y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

/// Paints one orbit at its current frame, faded by the entrance animation.
pub fn draw(cr: &Context, state: &PanelState) -> Result<(), cairo::Error> {
    cr.push_group();
    let drawn = draw_orbit(cr, state).and_then(|_| draw_tooltip(cr, state));
    cr.pop_group_to_source()?;
    drawn?;
    cr.paint_with_alpha(state.opacity())
}

fn draw_orbit(cr: &Context, state: &PanelState) -> Result<(), cairo::Error> {
    let center = state.center();
    let accent = state.system.accent;

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.scale(state.scale(), state.scale());

    set_source(cr, accent.with_alpha(RING_BORDER_ALPHA));
    cr.set_line_width(1.0);
    for ring in &state.layout.rings {
        cr.new_sub_path();
        cr.arc(0.0, 0.0, ring.radius, 0.0, 2.0 * PI);
    }
    cr.stroke()?;

    draw_center(cr, accent, &state.palette)?;

    for marker in state.layout.markers_at(state.elapsed, Point::default()) {
        let Some((_, item)) = state.layout.get(marker.target) else {
            continue;
        };
        MarkerRenderer {
            marker: &marker,
            visual: &item.visual,
            pixbuf: state.icons.get(&item.visual.icon),
            radius: state.layout.marker_radius,
            hovered: state.hovered == Some(marker.target),
        }
        .draw(cr, &state.palette)?;
    }

    cr.restore()
}

fn draw_center(cr: &Context, accent: HexColor, palette: &Palette) -> Result<(), cairo::Error> {
    cr.arc(0.0, 0.0, CENTER_RADIUS, 0.0, 2.0 * PI);
    set_source(cr, accent.with_alpha(CENTER_FILL_ALPHA));
    cr.fill_preserve()?;
    set_source(cr, accent.with_alpha(RING_BORDER_ALPHA));
    cr.set_line_width(MARKER_BORDER_WIDTH);
    cr.stroke()?;

    set_source(cr, palette.center_icon);
    cr.select_font_face("Monospace", FontSlant::Normal, FontWeight::Bold);
    cr.set_font_size(CENTER_RADIUS * 0.6);
    show_centered(cr, CENTER_GLYPH, 0.0, 0.0)
}

fn rounded_rect(cr: &Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

/// Where a tooltip box lands around its marker.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TooltipFrame {
    x: f64,
    y: f64,
    /// Box sits under the marker with the arrow pointing up.
    below: bool,
}

/// Places a `w` x `h` tooltip above the marker at `anchor`, or below it when
/// the top edge would leave the widget. `reach` is the drawn marker radius.
/// The box is kept inside the widget horizontally when it fits.
fn tooltip_frame(anchor: Point, reach: f64, w: f64, h: f64, area_width: f64) -> TooltipFrame {
    let above = anchor.y - reach - TOOLTIP_GAP - h;
    let below = above < TOOLTIP_ARROW;
    let y = if below {
        anchor.y + reach + TOOLTIP_GAP
    } else {
        above
    };
    let x = (anchor.x - w / 2.0).min(area_width - w).max(0.0);
    TooltipFrame { x, y, below }
}

/// Label for the hovered marker. Drawn in widget space so it stays upright
/// while the ring turns.
fn draw_tooltip(cr: &Context, state: &PanelState) -> Result<(), cairo::Error> {
    let Some(target) = state.hovered else {
        return Ok(());
    };
    let (Some((ring, item)), Some(anchor)) = (
        state.layout.get(target),
        state.marker_screen_position(target),
    ) else {
        return Ok(());
    };

    let label = item.id.as_str();
    let detail = ring.category.as_str();

    cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Bold);
    cr.set_font_size(13.0);
    let label_ext = cr.text_extents(label)?;
    cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
    cr.set_font_size(11.0);
    let detail_ext = cr.text_extents(detail)?;

    let line_gap = 4.0;
    let w = label_ext.width().max(detail_ext.width()) + TOOLTIP_PADDING_X * 2.0;
    let h = label_ext.height() + detail_ext.height() + line_gap + TOOLTIP_PADDING_Y * 2.0;
    let reach = state.layout.marker_radius * HOVER_SCALE * state.scale();
    let frame = tooltip_frame(anchor, reach, w, h, state.allocation.0);

    set_source(cr, state.palette.tooltip_background);
    rounded_rect(cr, frame.x, frame.y, w, h, 6.0);
    cr.fill()?;
    let (base, tip) = if frame.below {
        (frame.y, frame.y - TOOLTIP_ARROW)
    } else {
        (frame.y + h, frame.y + h + TOOLTIP_ARROW)
    };
    cr.move_to(anchor.x - TOOLTIP_ARROW, base);
    cr.line_to(anchor.x + TOOLTIP_ARROW, base);
    cr.line_to(anchor.x, tip);
    cr.close_path();
    cr.fill()?;

    let text_x = frame.x + w / 2.0;
    let label_y = frame.y + TOOLTIP_PADDING_Y + label_ext.height() / 2.0;
    set_source(cr, state.palette.tooltip_text);
    cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Bold);
    cr.set_font_size(13.0);
    show_centered(cr, label, text_x, label_y)?;

    let detail_y = label_y + label_ext.height() / 2.0 + line_gap + detail_ext.height() / 2.0;
    set_source(cr, state.palette.tooltip_secondary);
    cr.select_font_face("Sans", FontSlant::Normal, FontWeight::Normal);
    cr.set_font_size(11.0);
    show_centered(cr, detail, text_x, detail_y)
}
