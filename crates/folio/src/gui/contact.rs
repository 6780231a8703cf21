use crate::contact::{ContactError, ContactForm, Credentials, EmailRequest, Field, SubmitStatus};
use chrono::Local;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use strum::IntoEnumIterator;

const SUCCESS_TEXT: &str = "Message sent successfully! I'll get back to you soon.";

pub struct ContactInit {
    pub credentials: Credentials,
    pub direct_email: String,
    pub jobs: async_channel::Sender<EmailRequest>,
}

#[derive(Debug)]
pub enum ContactMsg {
    Submit,
    Delivered(Result<(), ContactError>),
    Reload {
        credentials: Credentials,
        direct_email: String,
    },
}

/// Text inputs keep their own buffers; the form reads them on submit and
/// clears them after a delivered message.
struct Inputs {
    full_name: gtk::EntryBuffer,
    email: gtk::EntryBuffer,
    phone: gtk::EntryBuffer,
    subject: gtk::EntryBuffer,
    message: gtk::TextBuffer,
}

impl Inputs {
    fn entry(&self, field: Field) -> Option<&gtk::EntryBuffer> {
        match field {
            Field::FullName => Some(&self.full_name),
            Field::Email => Some(&self.email),
            Field::Phone => Some(&self.phone),
            Field::Subject => Some(&self.subject),
            Field::Message => None,
        }
    }

    fn read_into(&self, form: &mut ContactForm) {
        for field in Field::iter() {
            let value = match self.entry(field) {
                Some(buffer) => buffer.text().to_string(),
                None => {
                    let (start, end) = self.message.bounds();
                    self.message.text(&start, &end, false).to_string()
                }
            };
            form.fields.set(field, value);
        }
    }

    fn clear(&self) {
        for field in Field::iter() {
            match self.entry(field) {
                Some(buffer) => buffer.set_text(""),
                None => self.message.set_text(""),
            }
        }
    }
}

pub struct ContactSection {
    form: ContactForm,
    credentials: Credentials,
    jobs: async_channel::Sender<EmailRequest>,
    inputs: Inputs,
}

impl ContactSection {
    fn status_text(&self) -> &str {
        match self.form.status() {
            SubmitStatus::Success => SUCCESS_TEXT,
            SubmitStatus::Error(message) => message,
            SubmitStatus::Idle | SubmitStatus::Sending => "",
        }
    }

    fn status_class(&self) -> &'static str {
        match self.form.status() {
            SubmitStatus::Error(_) => "error",
            _ => "success",
        }
    }

    fn button_label(&self) -> &'static str {
        if self.form.is_sending() {
            "Sending..."
        } else {
            "Send Message"
        }
    }

    fn submit(&mut self) {
        self.inputs.read_into(&mut self.form);
        let request = match self.form.begin_submit(&self.credentials, Local::now()) {
            Ok(request) => request,
            Err(e) => {
                log::debug!("Contact form not sent: {}", e);
                return;
            }
        };

        if let Err(e) = self.jobs.try_send(request) {
            log::error!("Mail worker unavailable: {}", e);
            self.form
                .finish(Err(ContactError::Network("mail worker unavailable".to_string())));
        }
    }
}

fn labeled_entry(label: &str, buffer: &gtk::EntryBuffer) -> gtk::Box {
    let column = gtk::Box::new(gtk::Orientation::Vertical, 6);
    column.add_css_class("contact-field");
    column.set_hexpand(true);
    column.append(&gtk::Label::builder().label(label).xalign(0.0).build());
    column.append(&gtk::Entry::with_buffer(buffer));
    column
}

#[relm4::component(pub)]
impl SimpleComponent for ContactSection {
    type Init = ContactInit;
    type Input = ContactMsg;
    type Output = ();

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Horizontal,
            set_spacing: 48,
            set_margin_all: 32,
            set_homogeneous: true,

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 12,

                gtk::Label {
                    add_css_class: "contact-eyebrow",
                    set_label: "CONTACT ME",
                    set_xalign: 0.0,
                },
                gtk::Label {
                    add_css_class: "contact-title",
                    set_label: "Get in touch",
                    set_xalign: 0.0,
                },
                gtk::Label {
                    set_label: "It is very important for us to keep in touch with you, so we are always ready to answer any question that interests you.",
                    set_wrap: true,
                    set_xalign: 0.0,
                },
                gtk::Label {
                    #[watch]
                    set_label: &format!("Or write directly to {}", model.form.direct_email()),
                    set_selectable: true,
                    set_xalign: 0.0,
                },
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 16,

                gtk::Box {
                    set_spacing: 16,
                    append: &labeled_entry("Full name", &model.inputs.full_name),
                    append: &labeled_entry("Email address", &model.inputs.email),
                },
                gtk::Box {
                    set_spacing: 16,
                    append: &labeled_entry("Phone number", &model.inputs.phone),
                    append: &labeled_entry("Subject", &model.inputs.subject),
                },
                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                    add_css_class: "contact-field",

                    gtk::Label {
                        set_label: "Message",
                        set_xalign: 0.0,
                    },
                    gtk::TextView {
                        set_buffer: Some(&model.inputs.message),
                        set_wrap_mode: gtk::WrapMode::WordChar,
                        set_height_request: 120,
                    },
                },

                gtk::Button {
                    set_halign: gtk::Align::Start,
                    #[watch]
                    set_label: model.button_label(),
                    #[watch]
                    set_sensitive: !model.form.is_sending(),
                    connect_clicked => ContactMsg::Submit,
                },

                gtk::Label {
                    set_wrap: true,
                    set_xalign: 0.0,
                    #[watch]
                    set_label: model.status_text(),
                    #[watch]
                    set_css_classes: &["contact-status", model.status_class()],
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let model = ContactSection {
            form: ContactForm::new(init.direct_email),
            credentials: init.credentials,
            jobs: init.jobs,
            inputs: Inputs {
                full_name: gtk::EntryBuffer::default(),
                email: gtk::EntryBuffer::default(),
                phone: gtk::EntryBuffer::default(),
                subject: gtk::EntryBuffer::default(),
                message: gtk::TextBuffer::new(None),
            },
        };

        let widgets = view_output!();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            ContactMsg::Submit => self.submit(),
            ContactMsg::Delivered(outcome) => {
                let delivered = outcome.is_ok();
                self.form.finish(outcome);
                if delivered {
                    self.inputs.clear();
                }
            }
            ContactMsg::Reload {
                credentials,
                direct_email,
            } => {
                self.credentials = credentials;
                self.form.set_direct_email(direct_email);
            }
        }
    }
}
