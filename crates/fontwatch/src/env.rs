//! Render Environment Boundary
//!
//! The registry and convergence loop never touch a document directly.
//! They see two primitives: inject raw style text, and render/measure a
//! hidden probe element. A browser backend implements [`RenderEnv`] over
//! its real DOM; [`ScriptedEnv`] is the in-memory stand-in used by tests
//! and examples.

use fontwatch_core::{ProbeBox, ProbeId};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// Capabilities the detection algorithm needs from a rendering host.
pub trait RenderEnv {
    /// Append raw CSS text to the one managed style sheet.
    fn inject_style(&mut self, css: &str);

    /// Attach a hidden probe element carrying the given class.
    ///
    /// A browser backend renders [`PROBE_TEXT`](fontwatch_core::PROBE_TEXT)
    /// in an element styled with
    /// [`PROBE_CSS_TEXT`](fontwatch_core::PROBE_CSS_TEXT) so every probe
    /// measures the same string at the same size.
    fn create_probe(&mut self, class_key: &str) -> ProbeId;

    /// Read the probe's current offset-based integer pixel box.
    fn measure(&self, probe: ProbeId) -> ProbeBox;

    /// Release a probe element. Called lazily once a check finishes;
    /// eager release is not required.
    fn detach_probe(&mut self, probe: ProbeId);

    /// Attach a temporary element with an existing class and read back
    /// its computed font-family, if the class resolves to one.
    fn computed_font_family(&mut self, class_name: &str) -> Option<String>;
}

/// In-memory environment serving scripted measurements.
///
/// Each probe holds a queue of boxes; every `measure` consumes one entry
/// until a single box remains, which then repeats forever. Probes with no
/// script report the environment's default box, so a fresh probe always
/// matches the baseline until a test says otherwise.
#[derive(Debug)]
pub struct ScriptedEnv {
    styles: Vec<String>,
    classes: HashMap<ProbeId, String>,
    boxes: RefCell<HashMap<ProbeId, VecDeque<ProbeBox>>>,
    class_families: HashMap<String, String>,
    detached: Vec<ProbeId>,
    default_box: ProbeBox,
    next_id: u32,
}

impl ScriptedEnv {
    pub fn new() -> Self {
        Self::with_default_box(ProbeBox::new(100, 300))
    }

    /// Environment whose unscripted probes all measure `default_box`
    pub fn with_default_box(default_box: ProbeBox) -> Self {
        Self {
            styles: Vec::new(),
            classes: HashMap::new(),
            boxes: RefCell::new(HashMap::new()),
            class_families: HashMap::new(),
            detached: Vec::new(),
            default_box,
            next_id: 0,
        }
    }

    /// Script the sequence of boxes a probe reports on successive measures
    pub fn script_boxes(&mut self, probe: ProbeId, sequence: impl IntoIterator<Item = ProbeBox>) {
        self.boxes
            .borrow_mut()
            .insert(probe, sequence.into_iter().collect());
    }

    /// Declare the computed font-family an existing class resolves to
    pub fn define_class_family(&mut self, class_name: &str, family: &str) {
        self.class_families
            .insert(class_name.to_string(), family.to_string());
    }

    /// Find the live probe created for a class key
    pub fn probe_for_class(&self, class_key: &str) -> Option<ProbeId> {
        self.classes
            .iter()
            .find(|(_, class)| class.as_str() == class_key)
            .map(|(id, _)| *id)
    }

    /// All style text injected so far, in order
    pub fn styles(&self) -> &[String] {
        &self.styles
    }

    /// Probes released so far
    pub fn detached(&self) -> &[ProbeId] {
        &self.detached
    }
}

impl Default for ScriptedEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEnv for ScriptedEnv {
    fn inject_style(&mut self, css: &str) {
        self.styles.push(css.to_string());
    }

    fn create_probe(&mut self, class_key: &str) -> ProbeId {
        let id = ProbeId(self.next_id);
        self.next_id += 1;
        self.classes.insert(id, class_key.to_string());
        id
    }

    fn measure(&self, probe: ProbeId) -> ProbeBox {
        let mut boxes = self.boxes.borrow_mut();
        match boxes.get_mut(&probe) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(self.default_box),
            Some(queue) => queue.front().copied().unwrap_or(self.default_box),
            None => self.default_box,
        }
    }

    fn detach_probe(&mut self, probe: ProbeId) {
        self.classes.remove(&probe);
        self.boxes.borrow_mut().remove(&probe);
        self.detached.push(probe);
    }

    fn computed_font_family(&mut self, class_name: &str) -> Option<String> {
        let class_name = class_name.strip_prefix('.').unwrap_or(class_name);
        self.class_families.get(class_name).cloned()
    }
}
