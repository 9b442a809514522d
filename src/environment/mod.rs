use std::{
	cell::RefCell,
	collections::HashMap,
	fmt,
	rc::{Rc, Weak},
};

use crate::interpreter::{Value, builtins::define_builtins};

/// A handle to one level of the scope chain. Clones share the same bindings.
#[derive(Clone, Default)]
pub(crate) struct Scope {
	inner: Rc<RefCell<Environment>>,
}

/// Every scope descended from one root, so the whole tree can be torn down
/// at once.
type Family = Rc<RefCell<Vec<Weak<RefCell<Environment>>>>>;

#[derive(Default)]
struct Environment {
	variables: HashMap<String, Value>,
	parent:    Option<Scope>,
	family:    Family,
}

impl Scope {
	/// An empty root scope.
	pub fn new() -> Self { Self::default() }

	/// A root scope with the built-ins bound.
	pub fn global() -> Self {
		let scope = Self::new();
		define_builtins(&scope);
		scope
	}

	/// A new empty scope whose lookups fall back to `self`.
	pub fn child(&self) -> Self {
		let family = self.inner.borrow().family.clone();
		let environment = Environment { variables: HashMap::new(), parent: Some(self.clone()), family: family.clone() };
		let child = Self { inner: Rc::new(RefCell::new(environment)) };

		let mut members = family.borrow_mut();
		// Forget finished calls before the list would grow.
		if members.len() == members.capacity() {
			members.retain(|member| member.strong_count() > 0);
		}
		members.push(Rc::downgrade(&child.inner));
		drop(members);
		child
	}

	/// Look `name` up through the chain, nearest binding first.
	pub fn get(&self, name: &str) -> Option<Value> {
		let environment = self.inner.borrow();
		match environment.variables.get(name) {
			Some(value) => Some(value.clone()),
			None => environment.parent.as_ref()?.get(name),
		}
	}

	/// Bind `name` in this scope, never in a parent.
	pub fn set(&self, name: impl Into<String>, value: Value) {
		self.inner.borrow_mut().variables.insert(name.into(), value);
	}

	/// Drop every binding of this scope and of all scopes created from the
	/// same root. A function bound in the scope it closes over keeps that
	/// scope alive forever otherwise.
	pub fn release(&self) {
		let family = self.inner.borrow().family.clone();
		let members: Vec<_> = family.borrow().iter().filter_map(Weak::upgrade).collect();
		for environment in members.iter().chain([&self.inner]) {
			let variables = std::mem::take(&mut environment.borrow_mut().variables);
			drop(variables);
		}
	}
}

// Scopes hold closures which hold scopes again, so only names are printed.
impl fmt::Debug for Scope {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let environment = self.inner.borrow();
		let mut names: Vec<_> = environment.variables.keys().collect();
		names.sort();
		f.debug_struct("Scope").field("names", &names).field("parent", &environment.parent).finish()
	}
}
