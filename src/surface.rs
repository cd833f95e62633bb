//! Display surface abstraction over the page document.
//!
//! Both decorations only ever touch the page through [`DisplaySurface`], and the
//! stardust tick driver only sets timers through [`Scheduler`], so everything
//! can run against the real DOM in the browser and in memory in tests.

use js_sys::Function;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

/// Element-level operations the decorations need from the page.
pub trait DisplaySurface {
	/// Handle to an element owned by the surface.
	type Element: Clone;

	/// Create a detached element with the given tag name.
	fn create_element(&mut self, tag: &str) -> Option<Self::Element>;

	/// Attach an element to the page body.
	fn append_element(&mut self, element: &Self::Element);

	/// Detach an element from the page. Removing a detached element is a no-op.
	fn remove_element(&mut self, element: &Self::Element);

	/// Look up an element by its `id` attribute.
	fn element_by_id(&self, id: &str) -> Option<Self::Element>;

	/// Set an inline style property.
	fn set_style(&mut self, element: &Self::Element, property: &str, value: &str);

	/// Replace the text content of an element.
	fn set_text(&mut self, element: &Self::Element, text: &str);

	/// Add (`enabled = true`) or remove a class.
	fn toggle_class(&mut self, element: &Self::Element, class: &str, enabled: bool);
}

/// [`DisplaySurface`] backed by the browser document.
#[derive(Clone, Debug)]
pub struct DomSurface {
	document: Document,
	body: HtmlElement,
}

impl DomSurface {
	/// Wrap a document. Returns `None` when the document has no `<body>` yet.
	pub fn new(document: Document) -> Option<Self> {
		let body = document.body()?;
		Some(Self { document, body })
	}

	/// Surface for the current window's document.
	pub fn current() -> Option<Self> {
		let document = web_sys::window()?.document()?;
		Self::new(document)
	}

	/// Underlying document.
	pub fn document(&self) -> &Document {
		&self.document
	}
}

impl DisplaySurface for DomSurface {
	type Element = HtmlElement;

	fn create_element(&mut self, tag: &str) -> Option<HtmlElement> {
		self.document.create_element(tag).ok()?.dyn_into().ok()
	}

	fn append_element(&mut self, element: &HtmlElement) {
		if let Err(e) = self.body.append_child(element) {
			log::warn!("moondust: failed to append element: {:?}", e);
		}
	}

	fn remove_element(&mut self, element: &HtmlElement) {
		element.remove();
	}

	fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
		self.document.get_element_by_id(id)?.dyn_into().ok()
	}

	fn set_style(&mut self, element: &HtmlElement, property: &str, value: &str) {
		let _ = element.style().set_property(property, value);
	}

	fn set_text(&mut self, element: &HtmlElement, text: &str) {
		element.set_text_content(Some(text));
	}

	fn toggle_class(&mut self, element: &HtmlElement, class: &str, enabled: bool) {
		let classes = element.class_list();
		let result = if enabled {
			classes.add_1(class)
		} else {
			classes.remove_1(class)
		};
		if let Err(e) = result {
			log::warn!("moondust: failed to toggle class {}: {:?}", class, e);
		}
	}
}

/// Repeating timer for a callback fixed when the scheduler is built.
pub trait Scheduler {
	/// Identifies a running interval.
	type Handle;

	/// Start invoking the callback every `interval_ms`. `None` if the timer
	/// could not be created.
	fn start_interval(&mut self, interval_ms: u32) -> Option<Self::Handle>;

	/// Stop a running interval.
	fn clear_interval(&mut self, handle: Self::Handle);
}

/// [`Scheduler`] backed by `window.setInterval`.
#[derive(Clone, Debug)]
pub struct DomScheduler {
	window: Window,
	callback: Function,
}

impl DomScheduler {
	/// Schedule `callback` on `window`.
	pub fn new(window: Window, callback: Function) -> Self {
		Self { window, callback }
	}
}

impl Scheduler for DomScheduler {
	type Handle = i32;

	fn start_interval(&mut self, interval_ms: u32) -> Option<i32> {
		let timeout = i32::try_from(interval_ms).unwrap_or(i32::MAX);
		match self
			.window
			.set_interval_with_callback_and_timeout_and_arguments_0(&self.callback, timeout)
		{
			Ok(handle) => Some(handle),
			Err(e) => {
				log::warn!("moondust: failed to start interval: {:?}", e);
				None
			}
		}
	}

	fn clear_interval(&mut self, handle: i32) {
		self.window.clear_interval_with_handle(handle);
	}
}

/// In-memory surface and scheduler used by unit tests.
#[cfg(test)]
pub(crate) mod testing {
	use std::collections::{BTreeSet, HashMap};

	use super::{DisplaySurface, Scheduler};

	#[derive(Clone, Debug, Default)]
	pub struct FakeNode {
		pub tag: String,
		pub id: Option<String>,
		pub attached: bool,
		pub text: String,
		pub styles: HashMap<String, String>,
		pub classes: BTreeSet<String>,
	}

	/// Elements are addressed by their index in `nodes`.
	#[derive(Debug, Default)]
	pub struct FakeSurface {
		pub nodes: Vec<FakeNode>,
		/// Number of `create_element` calls left before creation starts failing.
		pub creation_budget: Option<usize>,
		pub mutations: usize,
	}

	impl FakeSurface {
		/// Surface pre-populated with attached elements carrying the given ids.
		pub fn with_ids(ids: &[&str]) -> Self {
			let nodes = ids
				.iter()
				.map(|id| FakeNode {
					tag: "span".into(),
					id: Some(id.to_string()),
					attached: true,
					..Default::default()
				})
				.collect();
			Self {
				nodes,
				..Default::default()
			}
		}

		pub fn by_id(&self, id: &str) -> &FakeNode {
			self.nodes
				.iter()
				.find(|n| n.id.as_deref() == Some(id))
				.expect("no element with that id")
		}

		pub fn attached(&self, tag: &str) -> Vec<&FakeNode> {
			self.nodes
				.iter()
				.filter(|n| n.attached && n.tag == tag)
				.collect()
		}
	}

	impl DisplaySurface for FakeSurface {
		type Element = usize;

		fn create_element(&mut self, tag: &str) -> Option<usize> {
			if let Some(budget) = self.creation_budget.as_mut() {
				if *budget == 0 {
					return None;
				}
				*budget -= 1;
			}
			self.nodes.push(FakeNode {
				tag: tag.to_string(),
				..Default::default()
			});
			Some(self.nodes.len() - 1)
		}

		fn append_element(&mut self, element: &usize) {
			self.nodes[*element].attached = true;
		}

		fn remove_element(&mut self, element: &usize) {
			self.nodes[*element].attached = false;
		}

		fn element_by_id(&self, id: &str) -> Option<usize> {
			self.nodes
				.iter()
				.position(|n| n.attached && n.id.as_deref() == Some(id))
		}

		fn set_style(&mut self, element: &usize, property: &str, value: &str) {
			self.nodes[*element]
				.styles
				.insert(property.to_string(), value.to_string());
		}

		fn set_text(&mut self, element: &usize, text: &str) {
			self.mutations += 1;
			self.nodes[*element].text = text.to_string();
		}

		fn toggle_class(&mut self, element: &usize, class: &str, enabled: bool) {
			self.mutations += 1;
			let classes = &mut self.nodes[*element].classes;
			if enabled {
				classes.insert(class.to_string());
			} else {
				classes.remove(class);
			}
		}
	}

	/// Records interval starts and stops; handles count up from 1.
	#[derive(Debug, Default)]
	pub struct FakeScheduler {
		pub started: Vec<u32>,
		pub cleared: Vec<u32>,
		pub running: Option<u32>,
		pub fail: bool,
	}

	impl Scheduler for FakeScheduler {
		type Handle = u32;

		fn start_interval(&mut self, _interval_ms: u32) -> Option<u32> {
			if self.fail {
				return None;
			}
			assert!(self.running.is_none(), "interval started twice");
			let handle = self.started.len() as u32 + 1;
			self.started.push(handle);
			self.running = Some(handle);
			Some(handle)
		}

		fn clear_interval(&mut self, handle: u32) {
			assert_eq!(self.running, Some(handle), "cleared an unknown interval");
			self.cleared.push(handle);
			self.running = None;
		}
	}
}
