use crate::config::{self, Config, HeadingConfig, HeadingSourceKind};
use crate::events::AppEvent;
use crate::gui::clock::{self, ClockState};
use crate::gui::compass::{self, CompassState};
use crate::gui::icons;
use crate::gui::theme::{self, ThemeColors};
use gtk::prelude::*;
use gtk4 as gtk;
use gyre::geometry::{Point, Size};
use gyre::gesture::DragEvent;
use gyre::heading::HeadingSample;
use gyre::protocol::Screen;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

pub const DEFAULT_WIDTH: i32 = 393;
pub const DEFAULT_HEIGHT: i32 = 852;

/// Monotonic clock every animation is measured against.
#[derive(Debug, Clone, Copy)]
pub struct Epoch(Instant);

impl Epoch {
    pub fn now(&self) -> Duration {
        self.0.elapsed()
    }
}

pub struct AppModel {
    pub screen: Rc<Cell<Screen>>,
    pub clock: Rc<RefCell<ClockState>>,
    pub compass: Rc<RefCell<CompassState>>,
    pub heading_source: HeadingSourceKind,
    pub epoch: Epoch,
    pub drag_origin: Option<Point>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Heading(HeadingSample),
    HeadingLost,
    ShowScreen(Screen),
    NextScreen,
    ToggleSheet,
    DragBegin(Point),
    /// Offset from the drag start.
    DragUpdate(Point),
    DragEnd,
    DragCancel,
    Tap(Point),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Heading(sample) => AppMsg::Heading(sample),
            AppEvent::HeadingLost => AppMsg::HeadingLost,
            AppEvent::ShowScreen(screen) => AppMsg::ShowScreen(screen),
            AppEvent::ToggleSheet => AppMsg::ToggleSheet,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Dials"),
            set_default_size: (DEFAULT_WIDTH, DEFAULT_HEIGHT),
            add_css_class: "dials-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => sender.input(AppMsg::Quit),
                        gtk::gdk::Key::Tab => sender.input(AppMsg::NextScreen),
                        _ => return glib::Propagation::Proceed,
                    }
                    glib::Propagation::Stop
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "dials-canvas",

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::DragBegin(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |_, dx, dy| {
                        sender.input(AppMsg::DragUpdate(Point::new(dx, dy)));
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::DragEnd);
                    },
                    connect_cancel[sender] => move |_, _| {
                        sender.input(AppMsg::DragCancel);
                    },
                },

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Tap(Point::new(x, y)));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let epoch = Epoch(Instant::now());
        let now = epoch.now();

        let model = AppModel {
            screen: Rc::new(Cell::new(config.screen)),
            clock: Rc::new(RefCell::new(ClockState::from_config(&config.clock, now))),
            compass: Rc::new(RefCell::new(CompassState::from_config(
                &config.compass,
                &config.heading,
            ))),
            heading_source: config.heading.source,
            epoch,
            drag_origin: None,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let (screen, clock_state, compass_state) = (
            model.screen.clone(),
            model.clock.clone(),
            model.compass.clone(),
        );
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let canvas = Size::new(width as f64, height as f64);
                let now = epoch.now();

                let result = match screen.get() {
                    Screen::Clock => {
                        clock::draw(cr, &clock_state.borrow(), canvas, now, &colors).map(|_| false)
                    }
                    Screen::Compass => {
                        compass::draw(cr, &mut compass_state.borrow_mut(), canvas, now, &colors)
                    }
                };
                match result {
                    // Label widths arrived this frame; lay out again with them.
                    Ok(true) => drawing_area.queue_draw(),
                    Ok(false) => {}
                    Err(e) => log::error!("Drawing error: {}", e),
                }
            });

        let (screen, clock_state, compass_state) = (
            model.screen.clone(),
            model.clock.clone(),
            model.compass.clone(),
        );
        widgets.drawing_area.add_tick_callback(move |drawing_area, _| {
            let now = epoch.now();
            // Staleness is tracked even while the clock is showing.
            let compass_dirty = compass_state.borrow_mut().tick(now);
            let dirty = match screen.get() {
                Screen::Clock => clock_state.borrow().is_animating(now),
                Screen::Compass => compass_dirty,
            };
            if dirty {
                drawing_area.queue_draw();
            }
            glib::ControlFlow::Continue
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        log::info!("showing {} screen", model.screen.get());

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        let now = self.epoch.now();
        let redraw = match msg {
            AppMsg::Heading(sample) => {
                log::trace!("heading {}", sample);
                self.compass.borrow_mut().apply_heading(sample, now);
                self.screen.get() == Screen::Compass
            }
            AppMsg::HeadingLost => {
                self.compass.borrow_mut().heading_lost();
                self.screen.get() == Screen::Compass
            }
            AppMsg::ShowScreen(screen) => self.show(screen, now),
            AppMsg::NextScreen => self.show(self.screen.get().next(), now),
            AppMsg::ToggleSheet => {
                if self.screen.get() != Screen::Compass {
                    self.show(Screen::Compass, now);
                }
                self.compass.borrow_mut().toggle_sheet(now);
                true
            }
            AppMsg::DragBegin(point) => {
                self.drag_origin = Some(point);
                self.pointer(DragEvent::Begin(point), now)
            }
            AppMsg::DragUpdate(offset) => match self.drag_origin {
                Some(origin) => self.pointer(DragEvent::Update(origin + offset), now),
                None => false,
            },
            AppMsg::DragEnd => {
                self.drag_origin = None;
                self.pointer(DragEvent::End, now)
            }
            AppMsg::DragCancel => {
                self.drag_origin = None;
                self.pointer(DragEvent::Cancel, now)
            }
            AppMsg::Tap(point) => {
                self.screen.get() == Screen::Compass && self.compass.borrow_mut().tap(point, now)
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.reconfigure(&new_config, now);
                    log::info!("Configuration reloaded");
                    true
                }
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    false
                }
            },
            AppMsg::Quit => {
                relm4::main_application().quit();
                false
            }
        };

        if redraw {
            self.drawing_area.queue_draw();
        }
    }
}

impl AppModel {
    fn show(&mut self, screen: Screen, now: Duration) -> bool {
        if self.screen.get() == screen {
            return false;
        }
        log::info!("switching to {} screen", screen);
        if screen == Screen::Clock {
            self.clock.borrow_mut().mount(now);
        }
        self.screen.set(screen);
        true
    }

    /// Gestures only drive the compass.
    fn pointer(&mut self, event: DragEvent, now: Duration) -> bool {
        if self.screen.get() != Screen::Compass {
            return false;
        }
        self.compass.borrow_mut().pointer(event, now)
    }

    fn reconfigure(&mut self, config: &Config, now: Duration) {
        if config.heading.source != self.heading_source {
            log::warn!(
                "heading source changed to {}, restart to apply",
                config.heading.source
            );
        }
        let heading = HeadingConfig {
            source: self.heading_source,
            ..config.heading.clone()
        };
        icons::clear();
        self.clock.borrow_mut().reconfigure(&config.clock, now);
        self.compass
            .borrow_mut()
            .reconfigure(&config.compass, &heading);
    }
}
