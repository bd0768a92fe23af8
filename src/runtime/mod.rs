//! Materialized classes: the runtime artifacts produced by
//! [`crate::Generator::build`].
//!
//! A generated class is a descriptor set, not mutated-at-runtime code: each
//! member carries its visibility and parameter list as metadata, and a
//! dispatch wrapper enforces arity and access on every call. Nothing here is
//! safe for concurrent use; a class and its instances belong to one thread.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::config::Visibility;
use crate::error::Error;
use crate::param::Param;
use crate::rng::{RandomSource, random_value};
use crate::value::Value;

pub mod args;

pub use args::Args;

static ID_COUNTER: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_id() -> u64 {
    ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Read-only materialized form of one method declaration.
#[derive(Debug, Clone)]
pub(crate) struct MethodSpec {
    pub(crate) visibility: Visibility,
    pub(crate) params: Vec<Param>,
    pub(crate) return_value: Option<Value>,
    pub(crate) generate_random: bool,
}

struct ClassData {
    id: u64,
    parent: Option<GeneratedClass>,
    instance_methods: HashMap<String, MethodSpec>,
    class_methods: HashMap<String, MethodSpec>,
    rng: Rc<RefCell<dyn RandomSource>>,
}

/// Where a call originates. Generated methods have no bodies of their own,
/// so the "from within the type's own methods" context is supplied
/// explicitly by the caller.
#[derive(Clone, Copy)]
pub enum CallOrigin<'a> {
    /// An ordinary external call site.
    External,
    /// A call made as if from inside a method body of the given class.
    Within(&'a GeneratedClass),
}

/// A freshly materialized class: a cheap-to-clone handle sharing one
/// descriptor set. Two `build()` calls yield two classes with distinct
/// identities and no shared mutable state.
#[derive(Clone)]
pub struct GeneratedClass {
    data: Rc<ClassData>,
}

impl GeneratedClass {
    pub(crate) fn from_parts(
        parent: Option<GeneratedClass>,
        instance_methods: HashMap<String, MethodSpec>,
        class_methods: HashMap<String, MethodSpec>,
        rng: Rc<RefCell<dyn RandomSource>>,
    ) -> GeneratedClass {
        GeneratedClass {
            data: Rc::new(ClassData {
                id: next_id(),
                parent,
                instance_methods,
                class_methods,
                rng,
            }),
        }
    }

    /// Unique identity of this class. Every `build()` produces a new one.
    pub fn id(&self) -> u64 {
        self.data.id
    }

    /// Create an instance of this class.
    pub fn instantiate(&self) -> Instance {
        Instance {
            class: self.clone(),
            id: next_id(),
        }
    }

    /// Derive an empty subclass. Members resolve through the ancestor chain,
    /// so the child responds to everything the parent declares, subject to
    /// the same visibility rules.
    pub fn subclass(&self) -> GeneratedClass {
        GeneratedClass::from_parts(
            Some(self.clone()),
            HashMap::new(),
            HashMap::new(),
            self.data.rng.clone(),
        )
    }

    /// Call a class-level method from an external call site.
    pub fn call_class(&self, name: &str, args: Args) -> Result<Value, Error> {
        self.call_class_from(CallOrigin::External, name, args)
    }

    /// Call a class-level method with an explicit origin.
    pub fn call_class_from(
        &self,
        origin: CallOrigin<'_>,
        name: &str,
        args: Args,
    ) -> Result<Value, Error> {
        let (owner, spec) = self
            .resolve(name, MemberLevel::Class)
            .ok_or_else(|| Error::NoSuchMethod(name.to_string()))?;
        check_visibility(spec.visibility, &owner, origin, name)?;
        self.dispatch(name, &spec, &args)
    }

    /// True when `self` is `ancestor` or derives from it.
    pub fn derives_from(&self, ancestor: &GeneratedClass) -> bool {
        let mut cur = Some(self.clone());
        while let Some(class) = cur {
            if class.id() == ancestor.id() {
                return true;
            }
            cur = class.data.parent.clone();
        }
        false
    }

    fn related_to(&self, other: &GeneratedClass) -> bool {
        self.derives_from(other) || other.derives_from(self)
    }

    fn resolve(&self, name: &str, level: MemberLevel) -> Option<(GeneratedClass, MethodSpec)> {
        let mut cur = Some(self.clone());
        while let Some(class) = cur {
            let table = match level {
                MemberLevel::Instance => &class.data.instance_methods,
                MemberLevel::Class => &class.data.class_methods,
            };
            if let Some(spec) = table.get(name) {
                return Some((class.clone(), spec.clone()));
            }
            cur = class.data.parent.clone();
        }
        None
    }

    fn dispatch(&self, name: &str, spec: &MethodSpec, args: &Args) -> Result<Value, Error> {
        args::bind(&spec.params, args)?;
        let value = if let Some(Value::Marker(marker)) = spec.return_value
            && spec.generate_random
        {
            random_value(marker, &mut *self.data.rng.borrow_mut())
        } else {
            spec.return_value.clone().unwrap_or(Value::Nil)
        };
        trace!(method = name, class_id = self.data.id, "dispatched stub method");
        Ok(value)
    }
}

/// An instance of a generated class. Instances carry no attribute state;
/// distinct instances (and distinct builds) share nothing mutable.
pub struct Instance {
    class: GeneratedClass,
    id: u64,
}

impl Instance {
    pub fn class(&self) -> &GeneratedClass {
        &self.class
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Call an instance method from an external call site. Only public
    /// methods are reachable this way.
    pub fn call(&self, name: &str, args: Args) -> Result<Value, Error> {
        self.call_from(CallOrigin::External, name, args)
    }

    /// Call an instance method with an explicit origin, standing in for a
    /// call made inside one of the receiver's own method bodies.
    pub fn call_from(
        &self,
        origin: CallOrigin<'_>,
        name: &str,
        args: Args,
    ) -> Result<Value, Error> {
        let (owner, spec) = self
            .class
            .resolve(name, MemberLevel::Instance)
            .ok_or_else(|| Error::NoSuchMethod(name.to_string()))?;
        check_visibility(spec.visibility, &owner, origin, name)?;
        self.class.dispatch(name, &spec, &args)
    }
}

#[derive(Clone, Copy)]
enum MemberLevel {
    Instance,
    Class,
}

fn check_visibility(
    visibility: Visibility,
    owner: &GeneratedClass,
    origin: CallOrigin<'_>,
    name: &str,
) -> Result<(), Error> {
    match visibility {
        Visibility::Public | Visibility::PublicClass => Ok(()),
        // Private members belong to exactly the class that declared them;
        // not even subclasses may call them.
        Visibility::Private | Visibility::PrivateClass => match origin {
            CallOrigin::Within(class) if class.id() == owner.id() => Ok(()),
            _ => Err(Error::PrivateCall(name.to_string())),
        },
        Visibility::Protected => match origin {
            CallOrigin::Within(class) if class.related_to(owner) => Ok(()),
            _ => Err(Error::ProtectedCall(name.to_string())),
        },
    }
}
