//! Type descriptors and instances
//!
//! A [`Class`] is the registry-side description of a Rust type that takes part
//! in the protocol. It carries:
//!
//! - the explicit name the type is registered and tagged under
//! - a standard constructor (serde `Deserialize` from the payload)
//! - an optional custom factory that replaces the standard constructor
//! - a projection to plain data (serde `Serialize`, or a custom one)
//! - the explicit table of referrable members: static members, instance
//!   methods and instance properties
//!
//! ```ignore
//! let greeter = Class::builder::<Greeter>("Greeter")
//!     .referrable_method("greet", Binding::Bound, |g: &Greeter, args: &[Value]| {
//!         Ok(Value::from(format!("hello {} from {}", args[0].as_str().unwrap_or("?"), g.name)))
//!     })
//!     .build();
//! ```

use crate::error::{Error, Result};
use crate::function::Function;
use crate::mark::{mark, Origin};
use crate::tag::Tag;
use crate::value::{Ref, Value};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::trace;

type Data = Arc<dyn Any + Send + Sync>;
type ConstructFn = dyn Fn(&Value) -> Result<Data> + Send + Sync;
type ProjectFn = dyn Fn(&(dyn Any + Send + Sync)) -> Result<Value> + Send + Sync;
type EqFn = dyn Fn(&(dyn Any + Send + Sync), &(dyn Any + Send + Sync)) -> bool + Send + Sync;
type DebugFn = dyn Fn(&(dyn Any + Send + Sync), &mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync;
type GetterFn = dyn Fn(&Instance) -> Result<Value> + Send + Sync;

/// How a referrable instance method is handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Permanently tied to the instance it was read from
    Bound,
    /// The shared method itself; the receiver is passed at call time
    Unbound,
}

enum Member {
    Method {
        function: Function,
        referrable: Option<Binding>,
    },
    Property {
        getter: Arc<GetterFn>,
        referrable: bool,
    },
}

/// Type descriptor.
pub struct Class {
    name: String,
    rust_type: &'static str,
    type_id: TypeId,
    construct: Arc<ConstructFn>,
    factory: Option<Arc<ConstructFn>>,
    projection: Arc<ProjectFn>,
    custom_projection: bool,
    eq: Arc<EqFn>,
    debug: Arc<DebugFn>,
    statics: IndexMap<String, Value>,
    members: IndexMap<String, Member>,
}

impl Class {
    /// Start describing `T` under the registered name `name`.
    pub fn builder<T>(name: impl Into<String>) -> ClassBuilder<T>
    where
        T: Serialize + DeserializeOwned + PartialEq + fmt::Debug + Send + Sync + 'static,
    {
        ClassBuilder::new(name.into())
    }

    /// Registered name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the Rust type behind this class
    pub fn rust_type(&self) -> &'static str {
        self.rust_type
    }

    /// True when the class provides its own factory
    pub fn has_factory(&self) -> bool {
        self.factory.is_some()
    }

    /// True when the class provides its own projection
    pub fn has_projection(&self) -> bool {
        self.custom_projection
    }

    /// Build an instance from a payload.
    ///
    /// Uses the custom factory when there is one, the standard constructor
    /// otherwise.
    pub fn construct(self: &Arc<Self>, payload: &Value) -> Result<Instance> {
        let build = self.factory.as_ref().unwrap_or(&self.construct);
        trace!(cls = %self.name, factory = self.factory.is_some(), "constructing instance");
        let data = build(payload)?;
        Ok(Instance {
            class: Arc::clone(self),
            data,
        })
    }

    /// Static member as stored (referrable statics carry their tag).
    pub fn static_member(&self, name: &str) -> Option<&Value> {
        self.statics.get(name)
    }

    /// Read a static member.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.static_member(name)
            .cloned()
            .ok_or_else(|| Error::UnknownMember {
                tag: Box::new(Tag::member(self.name.as_str(), name)),
            })
    }

    /// Call a static member.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.get(name)?.as_function() {
            Some(f) => f.call(args),
            None => Err(Error::NotCallable {
                tag: Box::new(Tag::member(self.name.as_str(), name).with_args(args.to_vec())),
            }),
        }
    }

    /// Names of static members, in declaration order
    pub fn static_names(&self) -> impl Iterator<Item = &str> {
        self.statics.keys().map(String::as_str)
    }

    /// Names of instance members, in declaration order
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("rust_type", &self.rust_type)
            .field("statics", &self.statics.keys().collect::<Vec<_>>())
            .field("members", &self.members.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Class`].
pub struct ClassBuilder<T> {
    name: String,
    factory: Option<Arc<ConstructFn>>,
    projection: Option<Arc<ProjectFn>>,
    statics: IndexMap<String, (Value, bool)>,
    members: IndexMap<String, Member>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ClassBuilder<T>
where
    T: Serialize + DeserializeOwned + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    fn new(name: String) -> Self {
        Self {
            name,
            factory: None,
            projection: None,
            statics: IndexMap::new(),
            members: IndexMap::new(),
            _marker: PhantomData,
        }
    }

    /// Custom factory used instead of the standard constructor.
    pub fn factory<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Result<T> + Send + Sync + 'static,
    {
        let factory: Arc<ConstructFn> =
            Arc::new(move |payload: &Value| f(payload).map(|t| Arc::new(t) as Data));
        self.factory = Some(factory);
        self
    }

    /// Custom projection used instead of the serde one.
    pub fn projection<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let name = self.name.clone();
        let projection: Arc<ProjectFn> = Arc::new(move |data: &(dyn Any + Send + Sync)| {
            data.downcast_ref::<T>().map(&f).ok_or_else(|| wrong_data(&name))
        });
        self.projection = Some(projection);
        self
    }

    /// Static member, returned as stored.
    pub fn static_member(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.statics.insert(name.into(), (value.into(), false));
        self
    }

    /// Static member that carries its own tag, so it re-encodes by reference.
    pub fn referrable_static(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.statics.insert(name.into(), (value.into(), true));
        self
    }

    /// Static function.
    pub fn static_fn<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.static_member(name, Function::new(name, f))
    }

    /// Static function that carries its own tag.
    pub fn referrable_static_fn<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.referrable_static(name, Function::new(name, f))
    }

    /// Instance method.
    pub fn method<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.add_method(name, None, f)
    }

    /// Instance method that is tagged when read through [`Instance::get`].
    pub fn referrable_method<F>(self, name: &str, binding: Binding, f: F) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.add_method(name, Some(binding), f)
    }

    fn add_method<F>(mut self, name: &str, referrable: Option<Binding>, f: F) -> Self
    where
        F: Fn(&T, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        let cls = self.name.clone();
        let function = Function::method(name, move |this: &Instance, args: &[Value]| {
            let data = this.downcast_ref::<T>().ok_or_else(|| wrong_data(&cls))?;
            f(data, args)
        });
        self.members.insert(
            name.to_string(),
            Member::Method {
                function,
                referrable,
            },
        );
        self
    }

    /// Instance property.
    pub fn property<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.add_property(name, false, f)
    }

    /// Instance property that is tagged when read through [`Instance::get`].
    pub fn referrable_property<F>(self, name: &str, f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.add_property(name, true, f)
    }

    fn add_property<F>(mut self, name: &str, referrable: bool, f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        let cls = self.name.clone();
        let getter = move |this: &Instance| -> Result<Value> {
            let data = this.downcast_ref::<T>().ok_or_else(|| wrong_data(&cls))?;
            Ok(f(data))
        };
        self.members.insert(
            name.to_string(),
            Member::Property {
                getter: Arc::new(getter),
                referrable,
            },
        );
        self
    }

    /// Finish the class.
    pub fn build(self) -> Arc<Class> {
        let cls = self.name.clone();
        let construct: Arc<ConstructFn> = Arc::new(move |payload: &Value| -> Result<Data> {
            let json = payload.to_json().map_err(|e| Error::Construct {
                cls: cls.clone(),
                reason: e.to_string(),
            })?;
            let data: T = serde_json::from_value(json).map_err(|e| Error::Construct {
                cls: cls.clone(),
                reason: e.to_string(),
            })?;
            Ok(Arc::new(data) as Data)
        });

        let custom_projection = self.projection.is_some();
        let projection = self.projection.unwrap_or_else(|| {
            let cls = self.name.clone();
            let serde_projection: Arc<ProjectFn> =
                Arc::new(move |data: &(dyn Any + Send + Sync)| {
                    let data = data.downcast_ref::<T>().ok_or_else(|| wrong_data(&cls))?;
                    let json = serde_json::to_value(data).map_err(Error::from)?;
                    Ok(Value::from(json))
                });
            serde_projection
        });

        let statics = self
            .statics
            .into_iter()
            .map(|(key, (value, referrable))| {
                let value = if referrable {
                    Value::from(Ref {
                        tag: Tag::member(self.name.as_str(), key.as_str()),
                        payload: value.into_payload(),
                    })
                } else {
                    value
                };
                (key, value)
            })
            .collect();

        Arc::new(Class {
            name: self.name,
            rust_type: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
            construct,
            factory: self.factory,
            projection,
            custom_projection,
            eq: Arc::new(
                |a: &(dyn Any + Send + Sync), b: &(dyn Any + Send + Sync)| {
                    match (a.downcast_ref::<T>(), b.downcast_ref::<T>()) {
                        (Some(a), Some(b)) => a == b,
                        _ => false,
                    }
                },
            ),
            debug: Arc::new(
                |data: &(dyn Any + Send + Sync), f: &mut fmt::Formatter<'_>| {
                    match data.downcast_ref::<T>() {
                        Some(data) => fmt::Debug::fmt(data, f),
                        None => write!(f, "<?>"),
                    }
                },
            ),
            statics,
            members: self.members,
        })
    }
}

fn wrong_data(cls: &str) -> Error {
    Error::Construct {
        cls: cls.to_string(),
        reason: "instance data does not match the class type".to_string(),
    }
}

/// Instance of a registered type.
#[derive(Clone)]
pub struct Instance {
    class: Arc<Class>,
    data: Data,
}

impl Instance {
    /// Wrap `data` as an instance of `class`.
    pub fn new<T: Any + Send + Sync>(class: &Arc<Class>, data: T) -> Result<Self> {
        if TypeId::of::<T>() != class.type_id {
            return Err(Error::WrongType {
                expected: class.rust_type,
                actual: std::any::type_name::<T>(),
            });
        }
        Ok(Instance {
            class: Arc::clone(class),
            data: Arc::new(data),
        })
    }

    /// The instance's class
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// Registered name of the instance's class
    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// Typed access to the underlying data
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Plain-data payload: the custom projection, or the serde one.
    pub fn to_plain(&self) -> Result<Value> {
        (self.class.projection)(self.data.as_ref())
    }

    /// Raw member read.
    ///
    /// Methods come back unbound; properties come back as computed. No tag is
    /// attached. `Ok(None)` when the class has no such member.
    pub fn member(&self, name: &str) -> Result<Option<Value>> {
        match self.class.members.get(name) {
            None => Ok(None),
            Some(Member::Method { function, .. }) => Ok(Some(Value::Function(function.clone()))),
            Some(Member::Property { getter, .. }) => getter(self).map(Some),
        }
    }

    /// Member read through the referrable accessor.
    ///
    /// Referrable members are tagged at read time with this instance's
    /// current payload. Bound methods come back tied to this instance.
    pub fn get(&self, name: &str) -> Result<Value> {
        let Some(member) = self.class.members.get(name) else {
            return Err(Error::UnknownMember {
                tag: Box::new(Tag::member(self.class_name(), name)),
            });
        };
        match member {
            Member::Method {
                function,
                referrable: Some(binding),
            } => mark(
                Origin::Instance(self),
                Some(name),
                Value::Function(function.clone()),
                *binding == Binding::Bound,
            ),
            Member::Method {
                function,
                referrable: None,
            } => Ok(Value::Function(function.clone())),
            Member::Property {
                getter,
                referrable: true,
            } => mark(Origin::Instance(self), Some(name), getter(self)?, false),
            Member::Property {
                getter,
                referrable: false,
            } => getter(self),
        }
    }

    /// Call a method on this instance.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        match self.member(name)? {
            Some(Value::Function(f)) => f.bind(self).call(args),
            Some(_) => Err(Error::NotCallable {
                tag: Box::new(Tag::member(self.class_name(), name).with_args(args.to_vec())),
            }),
            None => Err(Error::UnknownMember {
                tag: Box::new(Tag::member(self.class_name(), name)),
            }),
        }
    }

    /// True when both handles share the same data
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
            || (self.class.name == other.class.name
                && (self.class.eq)(self.data.as_ref(), other.data.as_ref()))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.class.name)?;
        (self.class.debug)(self.data.as_ref(), f)?;
        write!(f, ")")
    }
}
