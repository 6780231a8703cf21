use crate::config::Config;
use crate::contact::{ContactError, EmailRequest};
use crate::events::AppEvent;
use crate::gui::contact::{ContactInit, ContactMsg, ContactSection};
use crate::gui::panel::{OrbitPanel, PanelInit, PanelMsg};
use crate::gui::theme;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit::ThemeContext;
use relm4::prelude::*;

pub struct AppModel {
    pub theme: ThemeContext,
    pub panels: Vec<Controller<OrbitPanel>>,
    pub contact: Controller<ContactSection>,
    pub root: gtk::ApplicationWindow,
}

#[derive(Debug)]
pub enum AppMsg {
    ToggleTheme,
    ConfigReload(Box<Config>),
    Delivered(Result<(), ContactError>),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload(config) => AppMsg::ConfigReload(config),
            AppEvent::Delivered(outcome) => AppMsg::Delivered(outcome),
        }
    }
}

fn panel_inits(config: &Config, theme: orbit::Theme) -> Vec<PanelInit> {
    let geometry = config.ring_geometry();
    let catalog = config.catalog();
    config
        .orbits
        .systems()
        .iter()
        .map(|system| PanelInit {
            system: system.clone(),
            geometry,
            marker_radius: config.geometry.marker_radius,
            size: config.geometry.size,
            catalog: catalog.clone(),
            theme,
        })
        .collect()
}

impl AppModel {
    fn reload(&mut self, config: Config) {
        let inits = panel_inits(&config, self.theme.theme());
        if inits.len() != self.panels.len() {
            log::warn!(
                "Orbit count changed from {} to {}; restart to add or remove panels",
                self.panels.len(),
                inits.len()
            );
        }
        for (panel, init) in self.panels.iter().zip(inits) {
            panel.emit(PanelMsg::Reload(Box::new(init)));
        }
        self.contact.emit(ContactMsg::Reload {
            credentials: config.emailjs,
            direct_email: config.contact.direct_email,
        });
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Config,
        async_channel::Sender<EmailRequest>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Folio"),
            set_default_size: (1200, 900),

            #[wrap(Some)]
            set_titlebar = &gtk::HeaderBar {
                pack_end = &gtk::Button {
                    set_icon_name: "weather-clear-night-symbolic",
                    set_tooltip_text: Some("Toggle theme (Ctrl+T)"),
                    connect_clicked => AppMsg::ToggleTheme,
                },
            },

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, modifiers| {
                    if modifiers.contains(gdk::ModifierType::CONTROL_MASK)
                        && matches!(key, gdk::Key::t | gdk::Key::T)
                    {
                        sender.input(AppMsg::ToggleTheme);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::ScrolledWindow {
                set_hscrollbar_policy: gtk::PolicyType::Never,

                #[name = "page"]
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 48,
                    add_css_class: "folio-page",

                    gtk::Label {
                        add_css_class: "folio-heading",
                        set_label: "My Tech Stack",
                        set_margin_top: 48,
                    },

                    #[name = "panel_row"]
                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_homogeneous: true,
                        set_spacing: 48,
                        set_margin_start: 24,
                        set_margin_end: 24,
                    },
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, jobs, rx) = init;

        theme::load_css();
        let theme_context = ThemeContext::new(config.theme);
        theme::apply_theme(&root, theme_context.theme());

        let panels: Vec<Controller<OrbitPanel>> = panel_inits(&config, theme_context.theme())
            .into_iter()
            .map(|init| OrbitPanel::builder().launch(init).detach())
            .collect();

        let contact = ContactSection::builder()
            .launch(ContactInit {
                credentials: config.emailjs.clone(),
                direct_email: config.contact.direct_email.clone(),
                jobs,
            })
            .detach();

        let model = AppModel {
            theme: theme_context,
            panels,
            contact,
            root: root.clone(),
        };

        let widgets = view_output!();

        for panel in &model.panels {
            widgets.panel_row.append(panel.widget());
        }
        widgets.page.append(model.contact.widget());

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::ToggleTheme => {
                let theme = self.theme.toggle_theme();
                theme::apply_theme(&self.root, theme);
                for panel in &self.panels {
                    panel.emit(PanelMsg::SetTheme(theme));
                }
                log::debug!("Theme switched to {}", theme);
            }
            AppMsg::ConfigReload(new_config) => {
                self.reload(*new_config);
                log::info!("Configuration reloaded");
            }
            AppMsg::Delivered(outcome) => {
                self.contact.emit(ContactMsg::Delivered(outcome));
            }
        }
    }
}
