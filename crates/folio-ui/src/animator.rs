//! Animation engine bridge
//!
//! Drives GSAP and its ScrollTrigger plugin through `js_sys::Reflect`, the
//! same way the page would from a script tag. Plans come from
//! [`folio_core::motion`]. Under [`MotionPolicy::Static`] nothing animates:
//! end states are written as inline styles and completion callbacks run
//! synchronously.
//!
//! # Usage
//!
//! ```rust,ignore
//! let animator = Animator::detect(&window);
//! animator.from_to(&[el], &Props::new().opacity(0.0), &motion::status_show())?;
//! ```

use folio_core::motion::{MotionPolicy, Props, ScrollCue, Step, StepKind, Timeline, Tween};
use js_sys::{Array, Function, Object, Reflect};
use serde::Serialize;
use tracing::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Window};

use crate::dom;
use crate::error::{Result, UiError};

/// Inline properties the static fallback may have written
const STATIC_PROPERTIES: [&str; 4] = ["opacity", "visibility", "transform", "width"];

fn global(window: &Window, name: &str) -> Option<JsValue> {
    Reflect::get(window, &JsValue::from_str(name))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Call `target[method](...args)`.
fn call(target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue> {
    let function = Reflect::get(target, &JsValue::from_str(method))?
        .dyn_into::<Function>()
        .map_err(|_| UiError::Js(format!("{method} is not a function")))?;
    let args: Array = args.iter().copied().collect();
    Ok(function.apply(target, &args)?)
}

fn set(object: &JsValue, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(object, &JsValue::from_str(key), value)?;
    Ok(())
}

/// Plain-object vars in the engine's shape.
fn to_vars<T: Serialize>(value: &T) -> Result<JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

fn targets(elements: &[Element]) -> JsValue {
    elements.iter().collect::<Array>().into()
}

/// Write an end state directly.
pub fn apply_props(elements: &[Element], props: &Props) {
    let styles = props.inline_styles();
    for element in elements {
        for (property, value) in &styles {
            dom::set_style(element, property, value);
        }
    }
}

/// Remove everything [`apply_props`] may have written.
pub fn clear_props(elements: &[Element]) {
    for element in elements {
        for property in STATIC_PROPERTIES {
            dom::clear_style(element, property);
        }
    }
}

/// Handle to the animation engine, or its absence
#[derive(Clone)]
pub struct Animator {
    gsap: Option<JsValue>,
    scroll_trigger: Option<JsValue>,
    policy: MotionPolicy,
}

impl std::fmt::Debug for Animator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("engine", &self.gsap.is_some())
            .field("scroll_trigger", &self.scroll_trigger.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Animator {
    /// Look up the engine globals, register the scroll plugin, and pick the
    /// motion policy. With reduced motion requested, every scroll trigger
    /// already created is killed.
    #[must_use]
    pub fn detect(window: &Window) -> Self {
        let gsap = global(window, "gsap");
        let scroll_trigger = global(window, "ScrollTrigger");

        if let (Some(engine), Some(plugin)) = (&gsap, &scroll_trigger) {
            if let Err(error) = call(engine, "registerPlugin", &[plugin]) {
                debug!(%error, "registerPlugin failed");
            }
        }

        let reduced = dom::media_matches(dom::REDUCED_MOTION_QUERY);
        let policy = MotionPolicy::resolve(gsap.is_some(), reduced);
        info!(engine = gsap.is_some(), reduced, ?policy, "motion policy");

        let animator = Self {
            gsap,
            scroll_trigger,
            policy,
        };
        if reduced {
            animator.kill_scroll_triggers();
        }
        animator
    }

    /// An animator that never animates
    #[must_use]
    pub const fn inert() -> Self {
        Self {
            gsap: None,
            scroll_trigger: None,
            policy: MotionPolicy::Static,
        }
    }

    #[must_use]
    pub const fn policy(&self) -> MotionPolicy {
        self.policy
    }

    #[must_use]
    pub const fn is_animated(&self) -> bool {
        self.policy.is_animated()
    }

    /// The engine, when animating
    fn engine(&self) -> Option<&JsValue> {
        self.gsap.as_ref().filter(|_| self.policy.is_animated())
    }

    /// The scroll plugin, when animating
    fn plugin(&self) -> Option<&JsValue> {
        self.scroll_trigger.as_ref().filter(|_| self.policy.is_animated())
    }

    #[must_use]
    pub fn has_scroll_triggers(&self) -> bool {
        self.plugin().is_some()
    }

    /// Tween to the end state; returns the engine's tween handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine call throws.
    pub fn to(&self, elements: &[Element], tween: &Tween) -> Result<Option<JsValue>> {
        let Some(engine) = self.engine() else {
            apply_props(elements, &tween.props);
            return Ok(None);
        };
        call(engine, "to", &[&targets(elements), &to_vars(tween)?]).map(Some)
    }

    /// Tween from the given state to the current one. Static mode leaves
    /// the current state alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine call throws.
    pub fn from(&self, elements: &[Element], tween: &Tween) -> Result<Option<JsValue>> {
        let Some(engine) = self.engine() else {
            return Ok(None);
        };
        call(engine, "from", &[&targets(elements), &to_vars(tween)?]).map(Some)
    }

    /// # Errors
    ///
    /// Returns an error if the engine call throws.
    pub fn from_to(&self, elements: &[Element], from: &Props, tween: &Tween) -> Result<Option<JsValue>> {
        let Some(engine) = self.engine() else {
            apply_props(elements, &tween.props);
            return Ok(None);
        };
        call(
            engine,
            "fromTo",
            &[&targets(elements), &to_vars(from)?, &to_vars(tween)?],
        )
        .map(Some)
    }

    /// Apply instantly, through the engine when present so it tracks the
    /// values.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine call throws.
    pub fn set(&self, elements: &[Element], tween: &Tween) -> Result<()> {
        match self.gsap.as_ref() {
            Some(engine) => call(engine, "set", &[&targets(elements), &to_vars(tween)?]).map(|_| ()),
            None => {
                if tween.clear_props.is_some() {
                    clear_props(elements);
                }
                apply_props(elements, &tween.props);
                Ok(())
            }
        }
    }

    /// Stop running tweens on the elements.
    pub fn kill_tweens_of(&self, elements: &[Element]) {
        if let Some(engine) = self.gsap.as_ref() {
            if let Err(error) = call(engine, "killTweensOf", &[&targets(elements)]) {
                debug!(%error, "killTweensOf failed");
            }
        }
    }

    /// Tween to the end state and run `on_complete` afterwards. Static mode
    /// applies the end state and runs it immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine call throws.
    pub fn to_then<F>(&self, elements: &[Element], tween: &Tween, on_complete: F) -> Result<Option<JsValue>>
    where
        F: FnOnce() + 'static,
    {
        let Some(engine) = self.engine() else {
            apply_props(elements, &tween.props);
            on_complete();
            return Ok(None);
        };
        let vars = to_vars(tween)?;
        set(&vars, "onComplete", &Closure::once_into_js(on_complete))?;
        call(engine, "to", &[&targets(elements), &vars]).map(Some)
    }

    /// Tween a plain counter object from zero, reporting each frame's value.
    /// Static mode reports the end value once.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine call throws.
    pub fn count_up<F>(&self, tween: &Tween, mut on_update: F) -> Result<()>
    where
        F: FnMut(f64) + 'static,
    {
        let end = tween.props.counter.unwrap_or_default();
        let Some(engine) = self.engine() else {
            on_update(end);
            return Ok(());
        };

        let counter = Object::new();
        set(&counter, "v", &JsValue::from_f64(0.0))?;
        let probe = counter.clone();
        let update = Closure::<dyn FnMut()>::new(move || {
            let value = Reflect::get(&probe, &JsValue::from_str("v"))
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or_default();
            on_update(value);
        });

        let vars = to_vars(tween)?;
        set(&vars, "onUpdate", update.as_ref())?;
        update.forget();
        call(engine, "to", &[&counter, &vars]).map(|_| ())
    }

    /// Tween `target` when `trigger` scrolls into view. Static mode applies
    /// the end state now.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine call throws.
    pub fn on_scroll(
        &self,
        target: &Element,
        trigger: &Element,
        kind: &StepKind,
        tween: &Tween,
        cue: &ScrollCue,
    ) -> Result<()> {
        let Some(engine) = self.engine() else {
            if !matches!(kind, StepKind::From) {
                apply_props(std::slice::from_ref(target), &tween.props);
            }
            return Ok(());
        };

        let vars = to_vars(tween)?;
        if self.plugin().is_some() {
            let scroll = to_vars(cue)?;
            set(&scroll, "trigger", trigger)?;
            set(&vars, "scrollTrigger", &scroll)?;
        }

        let target = targets(std::slice::from_ref(target));
        match kind {
            StepKind::From => call(engine, "from", &[&target, &vars]),
            StepKind::FromTo(from) => call(engine, "fromTo", &[&target, &to_vars(from)?, &vars]),
            StepKind::To | StepKind::Set => call(engine, "to", &[&target, &vars]),
        }
        .map(|_| ())
    }

    /// Register a standalone scroll trigger.
    ///
    /// # Errors
    ///
    /// Returns `UiError::Js` when the plugin is unavailable or throws.
    pub fn scroll_trigger(&self, vars: &Object) -> Result<JsValue> {
        let plugin = self
            .plugin()
            .ok_or_else(|| UiError::Js("ScrollTrigger is not available".to_string()))?;
        call(plugin, "create", &[vars])
    }

    fn each_scroll_trigger(&self, method: &str) {
        let Some(plugin) = self.scroll_trigger.as_ref() else {
            return;
        };
        match call(plugin, "getAll", &[]) {
            Ok(all) => {
                for instance in Array::from(&all).iter() {
                    if let Err(error) = call(&instance, method, &[]) {
                        debug!(method, %error, "scroll trigger call failed");
                    }
                }
            }
            Err(error) => debug!(%error, "ScrollTrigger.getAll failed"),
        }
    }

    pub fn disable_scroll_triggers(&self) {
        self.each_scroll_trigger("disable");
    }

    pub fn enable_scroll_triggers(&self) {
        self.each_scroll_trigger("enable");
    }

    pub fn kill_scroll_triggers(&self) {
        self.each_scroll_trigger("kill");
    }

    /// Play a timeline plan. `resolve` maps each named part to its elements.
    /// Static mode applies every step instantly and completes synchronously.
    ///
    /// # Errors
    ///
    /// Returns an error if an engine call throws; `on_complete` has not run
    /// in that case.
    pub fn play<R, F>(&self, plan: &Timeline, resolve: R, on_complete: F) -> Result<Option<JsValue>>
    where
        R: Fn(&str) -> Vec<Element>,
        F: FnOnce() + 'static,
    {
        let Some(engine) = self.engine() else {
            for step in &plan.steps {
                apply_step_statically(step, &resolve(step.part));
            }
            on_complete();
            return Ok(None);
        };

        let defaults = Object::new();
        set(&defaults, "ease", &JsValue::from_str(plan.ease))?;
        let vars = Object::new();
        set(&vars, "defaults", &defaults)?;
        set(&vars, "onComplete", &Closure::once_into_js(on_complete))?;
        let timeline = call(engine, "timeline", &[&vars])?;

        for step in &plan.steps {
            let elements = resolve(step.part);
            let tween = to_vars(&step.tween)?;
            let position = step
                .position
                .as_engine_param()
                .map_or(JsValue::UNDEFINED, |p| JsValue::from_str(&p));
            let target = targets(&elements);
            match &step.kind {
                StepKind::To => call(&timeline, "to", &[&target, &tween, &position]),
                StepKind::From => call(&timeline, "from", &[&target, &tween, &position]),
                StepKind::FromTo(from) => {
                    call(&timeline, "fromTo", &[&target, &to_vars(from)?, &tween, &position])
                }
                StepKind::Set => call(&timeline, "set", &[&target, &tween, &position]),
            }?;
        }

        debug!(name = plan.name, "timeline started");
        Ok(Some(timeline))
    }

    /// Stop a running tween or timeline handle.
    pub fn kill(handle: &JsValue) {
        if let Err(error) = call(handle, "kill", &[]) {
            debug!(%error, "kill failed");
        }
    }
}

fn apply_step_statically(step: &Step, elements: &[Element]) {
    match &step.kind {
        StepKind::To | StepKind::FromTo(_) => apply_props(elements, &step.tween.props),
        StepKind::From => {}
        StepKind::Set => {
            if step.tween.clear_props.is_some() {
                clear_props(elements);
            }
            apply_props(elements, &step.tween.props);
        }
    }
}
