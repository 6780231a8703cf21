use super::model::PanelState;
use super::view;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit::{OrbitSystem, Point, RingGeometry, Theme, VisualCatalog};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct PanelInit {
    pub system: OrbitSystem,
    pub geometry: RingGeometry,
    pub marker_radius: f64,
    pub size: f64,
    pub catalog: VisualCatalog,
    pub theme: Theme,
}

#[derive(Debug)]
pub enum PanelMsg {
    CursorMove(Point),
    CursorLeave,
    SetTheme(Theme),
    Reload(Box<PanelInit>),
}

/// One animated orbit with its title. Frames are driven by the widget's
/// frame clock; messages only carry pointer, theme and config changes.
pub struct OrbitPanel {
    state: Rc<RefCell<PanelState>>,
    title: String,
    drawing_area: gtk::DrawingArea,
}

impl OrbitPanel {
    fn sync_cursor(&self) {
        let pointer = self.state.borrow().hovered.is_some().then_some("pointer");
        self.drawing_area.set_cursor_from_name(pointer);
    }
}

/// Hover is re-checked every frame since markers move under a still pointer.
fn tick(area: &gtk::DrawingArea, clock: &gtk::gdk::FrameClock, state: &RefCell<PanelState>) {
    let allocation = (area.width() as f64, area.height() as f64);
    let hover_changed = state.borrow_mut().advance(clock.frame_time(), allocation);
    if hover_changed {
        let pointer = state.borrow().hovered.is_some().then_some("pointer");
        area.set_cursor_from_name(pointer);
    }
    area.queue_draw();
}

#[relm4::component(pub)]
impl SimpleComponent for OrbitPanel {
    type Init = PanelInit;
    type Input = PanelMsg;
    type Output = ();

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 16,
            set_hexpand: true,

            gtk::Label {
                add_css_class: "orbit-title",
                #[watch]
                set_label: &model.title,
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                add_css_class: "orbit-area",
                set_content_width: model.state.borrow().size as i32,
                set_content_height: model.state.borrow().size as i32,
                set_hexpand: true,
                set_vexpand: true,

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(PanelMsg::CursorMove(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(PanelMsg::CursorLeave);
                    }
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let title = init.system.title.clone();
        let state = PanelState::new(
            init.system,
            &init.geometry,
            init.marker_radius,
            init.size,
            &init.catalog,
            init.theme,
        );

        let model = OrbitPanel {
            state: Rc::new(RefCell::new(state)),
            title,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let state_draw = model.state.clone();
        widgets.drawing_area.set_draw_func(move |_, cr, _, _| {
            if let Err(e) = view::draw(cr, &state_draw.borrow()) {
                log::error!("Drawing error: {}", e);
            }
        });

        // Ticking only while mapped; a fresh map replays the entrance.
        let tick_id: Rc<RefCell<Option<gtk::TickCallbackId>>> = Rc::default();
        let (state_map, tick_map) = (model.state.clone(), tick_id.clone());
        widgets.drawing_area.connect_map(move |area| {
            state_map.borrow_mut().timer.reset();
            let state_tick = state_map.clone();
            let id = area.add_tick_callback(move |area, clock| {
                tick(area, clock, &state_tick);
                glib::ControlFlow::Continue
            });
            if let Some(old) = tick_map.replace(Some(id)) {
                old.remove();
            }
        });
        widgets.drawing_area.connect_unmap(move |_| {
            if let Some(id) = tick_id.take() {
                id.remove();
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            PanelMsg::CursorMove(point) => {
                if self.state.borrow_mut().update_cursor(Some(point)) {
                    self.sync_cursor();
                }
            }
            PanelMsg::CursorLeave => {
                if self.state.borrow_mut().update_cursor(None) {
                    self.sync_cursor();
                }
            }
            PanelMsg::SetTheme(theme) => {
                self.state.borrow_mut().set_theme(theme);
            }
            PanelMsg::Reload(init) => {
                let PanelInit {
                    system,
                    geometry,
                    marker_radius,
                    size,
                    catalog,
                    ..
                } = *init;
                self.title = system.title.clone();
                self.drawing_area.set_content_width(size as i32);
                self.drawing_area.set_content_height(size as i32);
                self.state
                    .borrow_mut()
                    .reload(system, &geometry, marker_radius, size, &catalog);
                self.sync_cursor();
            }
        }
        self.drawing_area.queue_draw();
    }
}
