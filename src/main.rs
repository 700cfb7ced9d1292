//! Moonlander entry point
//!
//! Handles platform-specific initialization and drives the session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Document;

    use moonlander::Settings;
    use moonlander::controls::ControlButton;
    use moonlander::sim::{ControlScheme, GamePhase, Session};

    /// Fallback delta for the first frame after the loop (re)starts
    const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;

    // JS shim for the iOS-style orientation permission gate. Desktop browsers
    // expose the event without a prompt; there the request resolves true
    // immediately.
    #[wasm_bindgen(inline_js = "
        export function orientation_available() {
            return 'DeviceOrientationEvent' in window;
        }

        export async function request_orientation_permission() {
            if (!('DeviceOrientationEvent' in window)) return false;
            if (typeof DeviceOrientationEvent.requestPermission !== 'function') return true;
            try {
                return (await DeviceOrientationEvent.requestPermission()) === 'granted';
            } catch (e) {
                console.error('Orientation permission request failed:', e);
                return false;
            }
        }
    ")]
    extern "C" {
        fn orientation_available() -> bool;
        fn request_orientation_permission() -> js_sys::Promise;
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        last_time: f64,
        loop_running: bool,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                session: Session::with_preferences(
                    settings.control_scheme,
                    settings.tilt_sensitivity,
                ),
                settings,
                last_time: 0.0,
                loop_running: false,
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Moonlander starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let mut settings = Settings::load();
        if settings.control_scheme == ControlScheme::Tilt && !orientation_available() {
            log::warn!("Orientation sensor unavailable, preferring touch controls");
            settings.control_scheme = ControlScheme::Touch;
        }

        let game = Rc::new(RefCell::new(Game::new(settings)));

        setup_keyboard_listeners(game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_orientation_listener(game.clone());
        setup_menu_buttons(&document, game.clone());
        setup_auto_pause(game.clone());

        update_hud(&game.borrow());

        log::info!("Moonlander ready");
    }

    /// Begin the descent with the currently selected scheme. Tilt needs the
    /// permission prompt resolved first; denial falls back to touch.
    fn start_session(game: Rc<RefCell<Game>>) {
        let scheme = game.borrow().session.state().control_scheme;

        if scheme == ControlScheme::Tilt {
            wasm_bindgen_futures::spawn_local(async move {
                let granted = JsFuture::from(request_orientation_permission())
                    .await
                    .ok()
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                {
                    let mut g = game.borrow_mut();
                    if granted {
                        g.session.begin(ControlScheme::Tilt);
                        g.session.controls_mut().grant_tilt_permission();
                    } else {
                        log::warn!("Orientation permission denied, starting with touch controls");
                        g.session.begin(ControlScheme::Touch);
                    }
                    update_hud(&g);
                }
                start_frame_loop(game);
            });
        } else {
            {
                let mut g = game.borrow_mut();
                g.session.begin(scheme);
                update_hud(&g);
            }
            start_frame_loop(game);
        }
    }

    /// Switch the control scheme, resolving the tilt permission gate when
    /// needed, and persist the preference.
    fn select_scheme(game: Rc<RefCell<Game>>, scheme: ControlScheme) {
        if scheme == ControlScheme::Tilt {
            if !orientation_available() {
                log::warn!("Orientation sensor unavailable, keeping touch controls");
                apply_scheme(&game, ControlScheme::Touch);
                return;
            }
            wasm_bindgen_futures::spawn_local(async move {
                let granted = JsFuture::from(request_orientation_permission())
                    .await
                    .ok()
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false);
                if granted {
                    apply_scheme(&game, ControlScheme::Tilt);
                    game.borrow_mut().session.controls_mut().grant_tilt_permission();
                } else {
                    log::warn!("Orientation permission denied, falling back to touch controls");
                    apply_scheme(&game, ControlScheme::Touch);
                }
            });
        } else {
            apply_scheme(&game, scheme);
        }
    }

    fn apply_scheme(game: &Rc<RefCell<Game>>, scheme: ControlScheme) {
        let mut g = game.borrow_mut();
        g.session.select_scheme(scheme);
        g.settings.control_scheme = scheme;
        g.settings.save();
        update_hud(&g);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Kick off the frame loop if the session is playing and it isn't
    /// already scheduled.
    fn start_frame_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.loop_running || g.session.state().phase != GamePhase::Playing {
                return;
            }
            g.loop_running = true;
            g.last_time = 0.0;
        }
        request_animation_frame(game);
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();

            if g.session.state().phase != GamePhase::Playing {
                // Paused (or reset) between frames: stop scheduling
                g.loop_running = false;
                g.last_time = 0.0;
                update_hud(&g);
                false
            } else {
                let dt = if g.last_time > 0.0 {
                    ((time - g.last_time) / 1000.0) as f32
                } else {
                    NOMINAL_FRAME_DT
                };
                g.last_time = time;

                g.session.advance(dt);
                update_hud(&g);

                let playing = g.session.state().phase == GamePhase::Playing;
                if !playing {
                    // Touched down this frame; the final state is on screen
                    g.loop_running = false;
                    g.last_time = 0.0;
                }
                playing
            }
        };

        if keep_running {
            request_animation_frame(game);
        }
    }

    fn setup_keyboard_listeners(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut resume_loop = false;
                {
                    let mut g = game.borrow_mut();
                    match event.code().as_str() {
                        "ArrowLeft" => g.session.controls_mut().press(ControlButton::RotateLeft),
                        "ArrowRight" => g.session.controls_mut().press(ControlButton::RotateRight),
                        "ArrowUp" | "Space" => g.session.controls_mut().press(ControlButton::Thrust),
                        "Escape" => match g.session.state().phase {
                            GamePhase::Playing => {
                                g.session.pause();
                                update_hud(&g);
                            }
                            GamePhase::Paused => {
                                g.session.resume();
                                resume_loop = true;
                            }
                            _ => {}
                        },
                        _ => {}
                    }
                }
                if resume_loop {
                    start_frame_loop(game.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.session.controls_mut().release(ControlButton::RotateLeft),
                    "ArrowRight" => g.session.controls_mut().release(ControlButton::RotateRight),
                    "ArrowUp" | "Space" => g.session.controls_mut().release(ControlButton::Thrust),
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen buttons used by the touch scheme (and the thrust button by
    /// the tilt scheme). Events for whichever scheme is inactive are dropped
    /// by the dispatcher.
    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let bindings = [
            ("touch-rotate-left", ControlButton::RotateLeft),
            ("touch-rotate-right", ControlButton::RotateRight),
            ("touch-thrust", ControlButton::Thrust),
        ];

        for (id, button) in bindings {
            let Some(element) = document.get_element_by_id(id) else {
                log::warn!("Missing control button #{id}");
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().session.controls_mut().press(button);
                });
                let _ = element
                    .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().session.controls_mut().release(button);
                });
                let _ = element
                    .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_orientation_listener(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure =
            Closure::<dyn FnMut(_)>::new(move |event: web_sys::DeviceOrientationEvent| {
                // A null gamma comes through as NaN and reads as a level device
                let gamma = event.gamma().unwrap_or(f64::NAN) as f32;
                game.borrow_mut()
                    .session
                    .controls_mut()
                    .orientation_reading(gamma);
            });
        let _ = window
            .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start button
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                start_session(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart button on the game-over overlay
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.session.reset();
                update_hud(&g);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resume button on the pause menu
        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.resume();
                start_frame_loop(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Control scheme selector
        let schemes = [
            ("scheme-keyboard", ControlScheme::Keyboard),
            ("scheme-touch", ControlScheme::Touch),
            ("scheme-tilt", ControlScheme::Tilt),
        ];
        for (id, scheme) in schemes {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                select_scheme(game.clone(), scheme);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tilt sensitivity slider
        if let Some(input) = document.get_element_by_id("tilt-sensitivity") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(target) = event.target() else { return };
                let Ok(input) = target.dyn_into::<web_sys::HtmlInputElement>() else {
                    return;
                };
                if let Ok(value) = input.value().parse::<f32>() {
                    let mut g = game.borrow_mut();
                    g.session.set_tilt_sensitivity(value);
                    g.settings.tilt_sensitivity = g.session.state().tilt_sensitivity;
                    g.settings.save();
                }
            });
            let _ =
                input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.session.state().phase == GamePhase::Playing {
                        g.session.pause();
                        log::info!("Auto-paused (tab hidden)");
                        update_hud(&g);
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.session.state().phase == GamePhase::Playing {
                    g.session.pause();
                    log::info!("Auto-paused (window blur)");
                    update_hud(&g);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Push the latest committed state into the DOM overlay elements
    fn update_hud(game: &Game) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let state = game.session.state();

        if let Some(el) = document.query_selector("#hud-altitude .hud-value").ok().flatten() {
            el.set_text_content(Some(&format!("{:.0} m", state.altitude)));
        }

        if let Some(el) = document.query_selector("#hud-fuel .hud-value").ok().flatten() {
            el.set_text_content(Some(&format!("{:.0}%", state.fuel)));
        }

        if let Some(el) = document.query_selector("#hud-velocity .hud-value").ok().flatten() {
            el.set_text_content(Some(&format!("{:.0} m/s", state.velocity.y)));
        }

        if let Some(el) = document.get_element_by_id("hud-scheme") {
            el.set_text_content(Some(state.control_scheme.as_str()));
        }

        // Phase-dependent overlays
        set_visible(&document, "start-screen", state.phase == GamePhase::Start);
        set_visible(
            &document,
            "hud",
            matches!(state.phase, GamePhase::Playing | GamePhase::Paused),
        );
        set_visible(&document, "pause-menu", state.phase == GamePhase::Paused);
        set_visible(&document, "game-over", state.phase == GamePhase::GameOver);

        // Touch controls are shown for the touch scheme, and just the thrust
        // button for tilt
        let show_rotation_buttons =
            state.control_scheme == ControlScheme::Touch && state.phase == GamePhase::Playing;
        let show_thrust_button = state.control_scheme != ControlScheme::Keyboard
            && state.phase == GamePhase::Playing;
        set_visible(&document, "touch-rotate-left", show_rotation_buttons);
        set_visible(&document, "touch-rotate-right", show_rotation_buttons);
        set_visible(&document, "touch-thrust", show_thrust_button);

        if state.phase == GamePhase::GameOver {
            if let Some(el) = document.get_element_by_id("outcome-title") {
                let title = if state.score > 0 {
                    "Successful Landing!"
                } else {
                    "Crash!"
                };
                el.set_text_content(Some(title));
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&state.score.to_string()));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Moonlander (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nFlying a scripted descent...");
    demo_descent();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a bang-bang throttle rides the sink rate down to a soft
/// touchdown, exercising the whole session without a browser.
#[cfg(not(target_arch = "wasm32"))]
fn demo_descent() {
    use moonlander::controls::ControlButton;
    use moonlander::sim::{ControlScheme, GamePhase, Session};

    let dt = 1.0 / 60.0;
    let mut session = Session::new();
    session.begin(ControlScheme::Touch);

    while session.state().phase == GamePhase::Playing {
        if session.state().velocity.y < -1.0 {
            session.controls_mut().press(ControlButton::Thrust);
        } else {
            session.controls_mut().release(ControlButton::Thrust);
        }
        session.advance(dt);
    }

    let state = session.state();
    assert_eq!(state.phase, GamePhase::GameOver);
    println!(
        "✓ Touched down at {:.2} m/s with {:.1}% fuel left - score {}",
        state.velocity.y.abs(),
        state.fuel,
        state.score
    );
}
