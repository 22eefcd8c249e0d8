//! The scope chain: mutable binding frames plus a namespace table.
//!
//! Frames are shared, reference-counted mutable maps. A frame lives for as
//! long as the longest-lived closure or active scope still referencing it;
//! `bind` mutates the current frame in place, `augment`/`spawn_from` push a
//! fresh child without touching the receiver. The namespace table is only
//! consulted on the chain's root frame.

use crate::types::Value;
use crate::{core, special_forms};
use derive_more::{Deref, DerefMut};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Default, Deref, DerefMut)]
pub struct Frame(HashMap<String, Value>);

/// A registration visible to qualified `namespace/name` lookups.
#[derive(Debug)]
pub enum NamespaceEntry {
    /// Another program's environment; lookup recurses into it.
    Environment(Rc<Environment>),
    /// An opaque host handle; members are fetched from its export table
    /// directly, without scope enforcement.
    Host(Rc<HostModule>),
}

/// A closed table of values exported by the host application. Host callables
/// are wrapped as `Value::Primitive` entries so programs can invoke them like
/// any other builtin; nothing outside this table is reachable.
#[derive(Debug, Default)]
pub struct HostModule {
    exports: HashMap<String, Value>,
}

impl HostModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export(&mut self, name: impl Into<String>, value: Value) {
        self.exports.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.exports.get(name)
    }
}

pub struct Environment {
    frame: RefCell<Frame>,
    parent: Option<Rc<Environment>>,
    namespaces: RefCell<HashMap<String, NamespaceEntry>>,
}

#[derive(Debug, PartialEq)]
pub struct SymbolNotFound(pub String);

impl fmt::Display for SymbolNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' not found", self.0)
    }
}

impl Environment {
    fn new_root() -> Rc<Self> {
        Rc::new(Environment {
            frame: RefCell::new(Frame::default()),
            parent: None,
            namespaces: RefCell::new(HashMap::new()),
        })
    }

    /// The base environment: a root frame with every special form and
    /// primitive bound to its reserved name.
    pub fn base() -> Rc<Self> {
        let root = Self::new_root();
        for (&name, &form) in special_forms::SPECIAL_FORMS.iter() {
            root.bind(name, Value::Special(form));
        }
        // The lambda special form answers to the language's λ spelling too.
        root.bind("λ", Value::Special(&special_forms::LAMBDA));
        for (&name, &func) in core::CORE.iter() {
            root.bind(name, Value::Primitive(func));
        }
        root
    }

    /// A fresh child frame on top of `parent`; the parent is unchanged.
    pub fn spawn_from(parent: &Rc<Self>) -> Rc<Self> {
        Rc::new(Environment {
            frame: RefCell::new(Frame::default()),
            parent: Some(parent.clone()),
            namespaces: RefCell::new(HashMap::new()),
        })
    }

    /// `spawn_from` seeded with `bindings`.
    pub fn augment(self: &Rc<Self>, bindings: HashMap<String, Value>) -> Rc<Self> {
        let child = Self::spawn_from(self);
        for (name, value) in bindings {
            child.bind(name, value);
        }
        child
    }

    /// Mutates the *current* frame's mapping in place.
    pub fn bind(&self, name: impl Into<String>, value: Value) {
        self.frame.borrow_mut().insert(name.into(), value);
    }

    /// The outermost frame of this chain, where `def` installs globals.
    pub fn root(self: &Rc<Self>) -> Rc<Self> {
        let mut current = self.clone();
        while let Some(parent) = current.parent.clone() {
            current = parent;
        }
        current
    }

    fn root_ref(&self) -> &Environment {
        let mut current = self;
        while let Some(parent) = current.parent.as_deref() {
            current = parent;
        }
        current
    }

    /// Registers `entry` in the chain root's namespace table, making it
    /// visible to subsequent qualified lookups.
    pub fn register_namespace(&self, name: impl Into<String>, entry: NamespaceEntry) {
        self.root_ref()
            .namespaces
            .borrow_mut()
            .insert(name.into(), entry);
    }

    pub fn lookup(&self, name: &str) -> Result<Value, SymbolNotFound> {
        match name.find('/') {
            // Only a separator with text on both sides marks a qualified
            // name; a symbol like "/" stays an ordinary lookup.
            Some(idx) if idx > 0 && idx + 1 < name.len() => {
                self.lookup_qualified(&name[..idx], &name[idx + 1..])
            }
            _ => self.lookup_unqualified(name),
        }
    }

    fn lookup_unqualified(&self, name: &str) -> Result<Value, SymbolNotFound> {
        if let Some(value) = self.frame.borrow().get(name) {
            return Ok(value.clone());
        }
        match self.parent.as_deref() {
            Some(parent) => parent.lookup_unqualified(name),
            None => Err(SymbolNotFound(name.to_string())),
        }
    }

    fn lookup_qualified(&self, namespace: &str, name: &str) -> Result<Value, SymbolNotFound> {
        let root = self.root_ref();
        let namespaces = root.namespaces.borrow();
        match namespaces.get(namespace) {
            None => Err(SymbolNotFound(format!("{}/{}", namespace, name))),
            Some(NamespaceEntry::Environment(env)) => env.lookup(name),
            Some(NamespaceEntry::Host(module)) => module
                .get(name)
                .cloned()
                .ok_or_else(|| SymbolNotFound(format!("{}/{}", namespace, name))),
        }
    }
}

// Not derived: namespace entries may point back into this chain.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame.borrow();
        let mut names: Vec<&str> = frame.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Environment")
            .field("bindings", &names)
            .field("is_root", &self.parent.is_none())
            .finish()
    }
}
