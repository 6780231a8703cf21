use freedesktop_icons::lookup;
use gdk_pixbuf::Pixbuf;
use orbit::{IconName, OrbitLayout};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const ICON_SIZE: i32 = 128;

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() && path.exists() {
        return Some(path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(ICON_SIZE as u16)
        .with_scale(1)
        .find()
}

/// Pixbufs for every icon an orbit shows. Names that do not resolve are kept
/// as `None` so the renderer draws the glyph instead.
#[derive(Default)]
pub struct IconCache {
    pixbufs: HashMap<IconName, Option<Pixbuf>>,
}

impl IconCache {
    pub fn for_layout(layout: &OrbitLayout) -> Self {
        let mut cache = Self::default();
        for item in layout.rings.iter().flat_map(|r| &r.items) {
            cache
                .pixbufs
                .entry(item.visual.icon.clone())
                .or_insert_with(|| Self::load(&item.visual.icon));
        }
        cache
    }

    fn load(name: &IconName) -> Option<Pixbuf> {
        let path = find_icon_path(name)?;
        match Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true) {
            Ok(pixbuf) => Some(pixbuf),
            Err(e) => {
                log::warn!("Failed to load icon {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn get(&self, name: &IconName) -> Option<&Pixbuf> {
        self.pixbufs.get(name).and_then(Option::as_ref)
    }
}
