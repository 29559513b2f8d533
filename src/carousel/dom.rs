// Browser binding for the carousel: executes controller commands against the
// `.slide` panels, the dot row and the auto-advance interval.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Element, HtmlMediaElement, HtmlVideoElement};

use super::music::{MusicAction, MusicToggle, PLAYING_CLASS};
use super::{CarouselCommand, CarouselController, CarouselEvent, CarouselOptions, SlideKind};
use crate::dom;

const ACTIVE: &str = "active";

struct CarouselRuntime {
    controller: CarouselController,
    slides: Vec<Element>,
    dots: Vec<Element>,
    videos: Vec<Option<HtmlVideoElement>>,
    interval_ms: u32,
    timer: Option<Interval>,
    // A cancelled interval may be the one currently running its callback, so
    // its closure is parked here until the next stop.
    retired: Option<Closure<dyn FnMut()>>,
}

type Shared = Rc<RefCell<CarouselRuntime>>;

// Listeners hold weak references; mounted carousels live for the page.
thread_local! {
    static MOUNTED: RefCell<Vec<Shared>> = const { RefCell::new(Vec::new()) };
}

impl CarouselRuntime {
    fn show_slide(&self, active: usize) {
        for (idx, slide) in self.slides.iter().enumerate() {
            slide.class_list().remove_1(ACTIVE).ok();
            if let Some(video) = &self.videos[idx] {
                video.pause().ok();
                video.set_current_time(0.0);
            }
            if idx == active {
                slide.class_list().add_1(ACTIVE).ok();
            }
        }
        for (idx, dot) in self.dots.iter().enumerate() {
            dot.class_list().remove_1(ACTIVE).ok();
            if idx == active {
                dot.class_list().add_1(ACTIVE).ok();
            }
        }
    }

    fn play_video(&self, idx: usize) {
        let Some(video) = self.videos.get(idx).and_then(|v| v.clone()) else {
            return;
        };
        match video.play() {
            Ok(promise) => spawn_local(async move {
                if JsFuture::from(promise).await.is_err() {
                    gloo::console::log!("Auto-play blocked");
                }
            }),
            Err(_) => gloo::console::log!("Auto-play blocked"),
        }
    }
}

fn dispatch(rt: &Shared, event: CarouselEvent) {
    let cmds = rt.borrow_mut().controller.handle(event);
    run_commands(rt, &cmds);
}

fn dispatcher(weak: Weak<RefCell<CarouselRuntime>>, event: CarouselEvent) -> impl Fn() + 'static {
    move || {
        if let Some(rt) = weak.upgrade() {
            dispatch(&rt, event);
        }
    }
}

fn run_commands(rt: &Shared, cmds: &[CarouselCommand]) {
    for cmd in cmds {
        match *cmd {
            CarouselCommand::ShowSlide(i) => rt.borrow().show_slide(i),
            CarouselCommand::PlayVideo(i) => rt.borrow().play_video(i),
            CarouselCommand::StopTimer => {
                let mut r = rt.borrow_mut();
                if let Some(timer) = r.timer.take() {
                    r.retired = Some(timer.cancel());
                }
            }
            CarouselCommand::StartTimer => {
                let ms = rt.borrow().interval_ms;
                let tick = dispatcher(Rc::downgrade(rt), CarouselEvent::Tick);
                let interval = Interval::new(ms, tick);
                rt.borrow_mut().timer = Some(interval);
            }
        }
    }
}

/// Wire the carousel found on the page. `#carouselDots`, `#prevBtn`, `#nextBtn`
/// and `.carousel-container` are required; the music controls are optional.
pub fn mount(options: CarouselOptions) -> Result<(), JsValue> {
    let doc = dom::document()?;
    let slides = dom::query_all_doc(&doc, ".slide")?;
    let dots_container = dom::require_id(&doc, "carouselDots")?;
    let prev_btn = dom::require_id(&doc, "prevBtn")?;
    let next_btn = dom::require_id(&doc, "nextBtn")?;
    let container = doc
        .query_selector(".carousel-container")?
        .ok_or_else(|| JsValue::from_str("missing .carousel-container"))?;

    let mut videos = Vec::with_capacity(slides.len());
    let mut kinds = Vec::with_capacity(slides.len());
    for slide in &slides {
        let video = slide
            .query_selector("video")?
            .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok());
        kinds.push(if video.is_some() { SlideKind::Video } else { SlideKind::Photo });
        videos.push(video);
    }

    let mut dots = Vec::with_capacity(slides.len());
    for idx in 0..slides.len() {
        let dot = doc.create_element("span")?;
        dot.class_list().add_1("dot")?;
        if idx == 0 {
            dot.class_list().add_1(ACTIVE)?;
        }
        dots_container.append_child(&dot)?;
        dots.push(dot);
    }

    let rt: Shared = Rc::new(RefCell::new(CarouselRuntime {
        controller: CarouselController::new(kinds, options.mode),
        slides,
        dots: dots.clone(),
        videos: videos.clone(),
        interval_ms: options.interval_ms,
        timer: None,
        retired: None,
    }));

    for (idx, dot) in dots.iter().enumerate() {
        let go = dispatcher(Rc::downgrade(&rt), CarouselEvent::GoTo(idx));
        EventListener::new(dot, "click", move |_| go()).forget();
    }
    for (idx, video) in videos.iter().enumerate() {
        if let Some(video) = video {
            let ended = dispatcher(Rc::downgrade(&rt), CarouselEvent::VideoEnded(idx));
            EventListener::new(video, "ended", move |_| ended()).forget();
        }
    }
    let prev = dispatcher(Rc::downgrade(&rt), CarouselEvent::Prev);
    EventListener::new(&prev_btn, "click", move |_| prev()).forget();
    let next = dispatcher(Rc::downgrade(&rt), CarouselEvent::Next);
    EventListener::new(&next_btn, "click", move |_| next()).forget();
    let enter = dispatcher(Rc::downgrade(&rt), CarouselEvent::HoverEnter);
    EventListener::new(&container, "mouseenter", move |_| enter()).forget();
    let leave = dispatcher(Rc::downgrade(&rt), CarouselEvent::HoverExit);
    EventListener::new(&container, "mouseleave", move |_| leave()).forget();

    mount_music(&doc)?;

    let cmds = rt.borrow_mut().controller.start();
    run_commands(&rt, &cmds);

    MOUNTED.with(|m| m.borrow_mut().push(rt));
    Ok(())
}

fn render_music_button(button: &Element, toggle: &MusicToggle) {
    button.set_text_content(Some(toggle.label()));
    if toggle.playing() {
        button.class_list().add_1(PLAYING_CLASS).ok();
    } else {
        button.class_list().remove_1(PLAYING_CLASS).ok();
    }
}

fn mount_music(doc: &web_sys::Document) -> Result<(), JsValue> {
    let (Some(button), Some(audio)) = (
        doc.get_element_by_id("musicBtn"),
        doc.get_element_by_id("backgroundMusic"),
    ) else {
        return Ok(());
    };
    let audio: HtmlMediaElement = audio.dyn_into()?;
    let toggle = Rc::new(RefCell::new(MusicToggle::new()));

    {
        let button_click = button.clone();
        let audio = audio.clone();
        let toggle = toggle.clone();
        EventListener::new(&button, "click", move |_| {
            let action = toggle.borrow_mut().click(audio.paused());
            match action {
                MusicAction::RequestPlay => match audio.play() {
                    Ok(promise) => {
                        let button = button_click.clone();
                        let toggle = toggle.clone();
                        spawn_local(async move {
                            match JsFuture::from(promise).await {
                                Ok(_) => {
                                    toggle.borrow_mut().play_started();
                                    render_music_button(&button, &toggle.borrow());
                                }
                                Err(err) => gloo::console::error!("Error playing music:", err),
                            }
                        });
                    }
                    Err(err) => gloo::console::error!("Error playing music:", err),
                },
                MusicAction::Pause => {
                    audio.pause().ok();
                    render_music_button(&button_click, &toggle.borrow());
                }
            }
        })
        .forget();
    }

    EventListener::new(&audio, "ended", move |_| {
        toggle.borrow_mut().ended();
        render_music_button(&button, &toggle.borrow());
    })
    .forget();
    Ok(())
}
