// Browser drivers: look up the page elements, hook pointer/resize events
// up to the simulations and keep them running off requestAnimationFrame

use crate::config::FieldConfig;
use crate::counter::CounterUp;
use crate::cursor::CursorFollower;
use crate::field::ParticleField;
use crate::navbar::{active_section, is_scrolled};
use crate::renderer::Renderer;
use crate::typed::TypedText;
#[cfg(feature = "frame-timing")]
use crate::utils::Timer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, Element, HtmlCanvasElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, NodeList, Window,
};

const SECTION_SELECTOR: &str = "section[id]";
const NAV_LINK_SELECTOR: &str = ".nav-link";
const MOBILE_LINK_SELECTOR: &str = ".mobile-link";
// Fraction of a counter that must be on screen before it starts
const COUNTER_VISIBLE_THRESHOLD: f64 = 0.5;

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

fn viewport_size(window: &Window) -> Result<(u32, u32), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

// Calls `frame` with the frame timestamp before each repaint until it returns
// false. The closure keeps a handle to itself so it can reschedule, so it is
// never freed, even after it stops.
fn run_frames<F>(window: Window, mut frame: F) -> Result<(), JsValue>
where
    F: FnMut(f64) -> bool + 'static,
{
    let next: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let first = next.clone();
    let scheduler = window.clone();

    *first.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        if !frame(now) {
            return;
        }
        if let Some(callback) = next.borrow().as_ref() {
            let callback = callback.as_ref().unchecked_ref();
            if let Err(err) = scheduler.request_animation_frame(callback) {
                console::warn_1(&err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let callback = first.borrow();
    if let Some(callback) = callback.as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

// Calls `frame` before every repaint for the rest of the page's life
fn run_every_frame<F: FnMut() + 'static>(window: Window, mut frame: F) -> Result<(), JsValue> {
    run_frames(window, move |_| {
        frame();
        true
    })
}

pub struct HeroCanvas {
    field: ParticleField,
    renderer: Renderer,
}

impl HeroCanvas {
    pub fn attach(canvas_id: &str, config: FieldConfig) -> Result<Self, JsValue> {
        let window = window()?;
        let canvas = document(&window)?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()?;
        let renderer = Renderer::new(canvas)?;

        let (width, height) = viewport_size(&window)?;
        renderer.resize(width, height);
        let mut rng = rand::thread_rng();
        let field = ParticleField::new(width as f64, height as f64, config, &mut rng);

        Ok(HeroCanvas { field, renderer })
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    // Pointer events carry viewport coordinates, the field wants canvas ones
    pub fn handle_mouse_move(&mut self, event: &MouseEvent) {
        let rect = self.renderer.canvas.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        self.field.handle_pointer_move(x, y);
    }

    pub fn handle_mouse_leave(&mut self) {
        self.field.handle_pointer_leave();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.field.handle_resize(width as f64, height as f64);
    }

    pub fn tick(&mut self) -> Result<(), JsValue> {
        #[cfg(feature = "frame-timing")]
        let _timer = Timer::new("HeroCanvas::tick");
        self.field.frame(&mut self.renderer)
    }
}

#[wasm_bindgen]
pub fn start_hero_canvas(canvas_id: &str) {
    start_hero_canvas_with(canvas_id, FieldConfig::default());
}

#[wasm_bindgen]
pub fn start_hero_canvas_with(canvas_id: &str, config: FieldConfig) {
    // No canvas or no 2d context: the page just goes without the background
    let hero = match HeroCanvas::attach(canvas_id, config) {
        Ok(hero) => hero,
        Err(_) => return,
    };
    if let Err(err) = run_hero(hero) {
        console::warn_1(&err);
    }
}

fn run_hero(hero: HeroCanvas) -> Result<(), JsValue> {
    let window = window()?;
    let (width, height) = hero.field.size();
    console::log_1(
        &format!(
            "hero canvas: {} particles on {}x{}",
            hero.field.particles().len(),
            width,
            height
        )
        .into(),
    );

    let canvas = hero.renderer.canvas.clone();
    let hero = Rc::new(RefCell::new(hero));

    {
        let hero = hero.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            hero.borrow_mut().handle_mouse_move(&event);
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }
    {
        let hero = hero.clone();
        let on_leave = Closure::wrap(Box::new(move || {
            hero.borrow_mut().handle_mouse_leave();
        }) as Box<dyn FnMut()>);
        canvas.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        on_leave.forget();
    }
    {
        let hero = hero.clone();
        let viewport = window.clone();
        let on_resize = Closure::wrap(Box::new(move || match viewport_size(&viewport) {
            Ok((width, height)) => hero.borrow_mut().resize(width, height),
            Err(err) => console::warn_1(&err),
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    run_every_frame(window, move || {
        if let Err(err) = hero.borrow_mut().tick() {
            console::warn_1(&err);
        }
    })
}

fn find_html_element(
    document: &Document,
    selector: &str,
) -> Result<Option<HtmlElement>, JsValue> {
    match document.query_selector(selector)? {
        Some(element) => Ok(Some(element.dyn_into::<HtmlElement>()?)),
        None => Ok(None),
    }
}

fn place(element: &HtmlElement, x: f64, y: f64) -> Result<(), JsValue> {
    let style = element.style();
    style.set_property("left", &format!("{}px", x))?;
    style.set_property("top", &format!("{}px", y))
}

/// Starts the custom cursor. Does nothing when either marker is missing
/// or the primary pointer is coarse (touch screens).
#[wasm_bindgen]
pub fn start_cursor(dot_selector: &str, outline_selector: &str) {
    if let Err(err) = run_cursor(dot_selector, outline_selector) {
        console::warn_1(&err);
    }
}

fn run_cursor(dot_selector: &str, outline_selector: &str) -> Result<(), JsValue> {
    let window = window()?;
    let document = document(&window)?;
    let (dot, outline) = match (
        find_html_element(&document, dot_selector)?,
        find_html_element(&document, outline_selector)?,
    ) {
        (Some(dot), Some(outline)) => (dot, outline),
        _ => return Ok(()),
    };
    let coarse = window
        .match_media("(pointer: coarse)")?
        .map_or(false, |query| query.matches());
    if coarse {
        return Ok(());
    }

    let cursor = Rc::new(RefCell::new(CursorFollower::default()));
    {
        let cursor = cursor.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = (event.client_x() as f64, event.client_y() as f64);
            cursor.borrow_mut().set_target(x, y);
            if let Err(err) = place(&dot, x, y) {
                console::warn_1(&err);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        document.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    run_every_frame(window, move || {
        let mut cursor = cursor.borrow_mut();
        cursor.step();
        if let Err(err) = place(&outline, cursor.outline_x(), cursor.outline_y()) {
            console::warn_1(&err);
        }
    })
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Toggles `.scrolled` on the navbar, and `.active` on the nav link whose
/// href points at the section currently scrolled into.
pub fn refresh_navbar(window: &Window, navbar: &Element) -> Result<(), JsValue> {
    let document = document(window)?;
    let scroll_y = window.scroll_y()?;
    navbar
        .class_list()
        .toggle_with_force("scrolled", is_scrolled(scroll_y))?;

    let sections: Vec<HtmlElement> = elements(document.query_selector_all(SECTION_SELECTOR)?)
        .into_iter()
        .filter_map(|section| section.dyn_into::<HtmlElement>().ok())
        .collect();
    let offsets: Vec<f64> = sections.iter().map(|s| s.offset_top() as f64).collect();
    let current = active_section(scroll_y, &offsets)
        .map(|idx| format!("#{}", sections[idx as usize].id()));

    for link in elements(document.query_selector_all(NAV_LINK_SELECTOR)?) {
        let active = current.is_some() && link.get_attribute("href") == current;
        link.class_list().toggle_with_force("active", active)?;
    }
    Ok(())
}

/// Starts the navbar: scroll styling, active link tracking and the mobile
/// menu toggle. Does nothing without the navbar; the menu part is skipped
/// when either the toggle or the menu is missing.
#[wasm_bindgen]
pub fn start_navbar(navbar_id: &str, toggle_id: &str, menu_id: &str) {
    if let Err(err) = run_navbar(navbar_id, toggle_id, menu_id) {
        console::warn_1(&err);
    }
}

fn run_navbar(navbar_id: &str, toggle_id: &str, menu_id: &str) -> Result<(), JsValue> {
    let window = window()?;
    let document = document(&window)?;
    let navbar = match document.get_element_by_id(navbar_id) {
        Some(navbar) => navbar,
        None => return Ok(()),
    };

    refresh_navbar(&window, &navbar)?;
    {
        let viewport = window.clone();
        let on_scroll = Closure::wrap(Box::new(move || {
            if let Err(err) = refresh_navbar(&viewport, &navbar) {
                console::warn_1(&err);
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        on_scroll.forget();
    }

    let (toggle, menu) = match (
        document.get_element_by_id(toggle_id),
        document.get_element_by_id(menu_id),
    ) {
        (Some(toggle), Some(menu)) => (toggle, menu),
        _ => return Ok(()),
    };
    {
        let menu = menu.clone();
        let on_toggle = Closure::wrap(Box::new(move || {
            if let Err(err) = menu.class_list().toggle("open") {
                console::warn_1(&err);
            }
        }) as Box<dyn FnMut()>);
        toggle.add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())?;
        on_toggle.forget();
    }
    for link in elements(menu.query_selector_all(MOBILE_LINK_SELECTOR)?) {
        let menu = menu.clone();
        let on_pick = Closure::wrap(Box::new(move || {
            if let Err(err) = menu.class_list().remove_1("open") {
                console::warn_1(&err);
            }
        }) as Box<dyn FnMut()>);
        link.add_event_listener_with_callback("click", on_pick.as_ref().unchecked_ref())?;
        on_pick.forget();
    }
    Ok(())
}

/// Reads a counter's final value from its `data-target` attribute.
pub fn counter_target(element: &Element) -> Option<u32> {
    element
        .get_attribute("data-target")?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|target| target.is_finite() && *target >= 0.0)
        .map(|target| target as u32)
}

fn animate_counter(window: Window, element: Element, counter: CounterUp) -> Result<(), JsValue> {
    let mut start = None;
    run_frames(window, move |now| {
        let elapsed = now - *start.get_or_insert(now);
        element.set_text_content(Some(&counter.value_at(elapsed).to_string()));
        !counter.is_finished(elapsed)
    })
}

/// Counts every element matching `selector` up to its `data-target` the first
/// time at least half of it scrolls into view.
#[wasm_bindgen]
pub fn start_counters(selector: &str) {
    if let Err(err) = run_counters(selector) {
        console::warn_1(&err);
    }
}

fn run_counters(selector: &str) -> Result<(), JsValue> {
    let window = window()?;
    let counters = elements(document(&window)?.query_selector_all(selector)?);
    if counters.is_empty() {
        return Ok(());
    }

    let on_visible = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let entries = (0..entries.length())
                .filter_map(|i| entries.get(i).dyn_into::<IntersectionObserverEntry>().ok());
            for entry in entries {
                if !entry.is_intersecting() {
                    continue;
                }
                let element = entry.target();
                observer.unobserve(&element);
                if let Some(target) = counter_target(&element) {
                    let counter = CounterUp::new(target);
                    if let Err(err) = animate_counter(window.clone(), element, counter) {
                        console::warn_1(&err);
                    }
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let mut options = IntersectionObserverInit::new();
    #[allow(deprecated)]
    options.threshold(&JsValue::from_f64(COUNTER_VISIBLE_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(on_visible.as_ref().unchecked_ref(), &options)?;
    for counter in &counters {
        observer.observe(counter);
    }
    on_visible.forget();
    Ok(())
}

/// Runs the portfolio role rotator inside the element with id `element_id`.
#[wasm_bindgen]
pub fn start_typed(element_id: &str) {
    start_typed_with(element_id, TypedText::default());
}

#[wasm_bindgen]
pub fn start_typed_with(element_id: &str, typed: TypedText) {
    if let Err(err) = run_typed(element_id, typed) {
        console::warn_1(&err);
    }
}

fn run_typed(element_id: &str, mut typed: TypedText) -> Result<(), JsValue> {
    let window = window()?;
    let element = match document(&window)?.get_element_by_id(element_id) {
        Some(element) => element,
        None => return Ok(()),
    };

    let mut shown = typed.text();
    element.set_text_content(Some(&shown));
    let mut last = None;
    run_frames(window, move |now| {
        if let Some(last) = last {
            typed.advance(now - last);
        }
        last = Some(now);
        let text = typed.text();
        if text != shown {
            element.set_text_content(Some(&text));
            shown = text;
        }
        true
    })
}
