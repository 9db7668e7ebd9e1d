//! Type-keyed capability registry.
//!
//! A capability is an abstract service contract, normally a trait object
//! type such as `dyn HostsDataService`. Each capability is bound to one
//! factory. The factory runs lazily on the first [`Registry::resolve`] and
//! the result is cached, so every later resolve returns the same `Rc`.
//!
//! ```text
//! Unbound --register--> Bound --first resolve--> Resolved (cached)
//! ```
//!
//! The registry is single-threaded (`RefCell`, `Rc`); bindings are expected
//! to be made during startup or test setup.

use crate::error::{HostsError, Result};
use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::rc::Rc;

type Factory<C> = Box<dyn FnOnce() -> Rc<C>>;

enum Binding {
    /// Holds a `Factory<C>`.
    Bound(Box<dyn Any>),
    /// Factory is running.
    Constructing,
    /// Holds an `Rc<C>`.
    Resolved(Box<dyn Any>),
}

/// Maps capabilities to lazily constructed singletons.
///
/// # Example
///
/// ```
/// use hostmgr::Registry;
/// use std::rc::Rc;
///
/// trait Greeter {
///     fn greet(&self) -> String;
/// }
///
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".into()
///     }
/// }
///
/// let registry = Registry::new();
/// registry.register::<dyn Greeter>(|| Rc::new(English)).unwrap();
///
/// let greeter = registry.resolve::<dyn Greeter>().unwrap();
/// assert_eq!(greeter.greet(), "hello");
/// ```
#[derive(Default)]
pub struct Registry {
    bindings: RefCell<HashMap<TypeId, Binding>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds capability `C` to `factory`.
    ///
    /// The factory is not called until the first [`resolve`](Self::resolve).
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::DuplicateCapability`] if `C` is already bound,
    /// whether or not it has been resolved yet.
    pub fn register<C>(&self, factory: impl FnOnce() -> Rc<C> + 'static) -> Result<()>
    where
        C: ?Sized + 'static,
    {
        let capability = type_name::<C>();
        let mut bindings = self.bindings.borrow_mut();
        match bindings.entry(TypeId::of::<C>()) {
            Entry::Occupied(_) => Err(HostsError::DuplicateCapability { capability }),
            Entry::Vacant(slot) => {
                let factory: Factory<C> = Box::new(factory);
                slot.insert(Binding::Bound(Box::new(factory)));
                tracing::debug!(capability, "Registered capability");
                Ok(())
            }
        }
    }

    /// Binds capability `C` to a concrete constructor plus an initializer.
    ///
    /// On first resolve, `factory` builds the concrete value and
    /// `initializer` runs exactly once to configure it and turn it into the
    /// capability. Its result is what every resolve returns from then on.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::DuplicateCapability`] if `C` is already bound.
    pub fn register_with<C, T>(
        &self,
        factory: impl FnOnce() -> T + 'static,
        initializer: impl FnOnce(T) -> Rc<C> + 'static,
    ) -> Result<()>
    where
        C: ?Sized + 'static,
        T: 'static,
    {
        self.register::<C>(move || initializer(factory()))
    }

    /// Returns the singleton bound to `C`, constructing it on first use.
    ///
    /// A factory may resolve other capabilities while it runs.
    ///
    /// # Errors
    ///
    /// Returns [`HostsError::CapabilityNotFound`] if nothing is bound to `C`,
    /// or [`HostsError::CapabilityCycle`] if `C`'s own factory resolves `C`.
    pub fn resolve<C>(&self) -> Result<Rc<C>>
    where
        C: ?Sized + 'static,
    {
        let id = TypeId::of::<C>();
        let capability = type_name::<C>();

        let factory = {
            let mut bindings = self.bindings.borrow_mut();
            let slot = bindings
                .get_mut(&id)
                .ok_or(HostsError::CapabilityNotFound { capability })?;

            match std::mem::replace(slot, Binding::Constructing) {
                Binding::Bound(factory) => factory,
                Binding::Resolved(instance) => {
                    let cached = instance.downcast_ref::<Rc<C>>().cloned();
                    *slot = Binding::Resolved(instance);
                    return cached.ok_or(HostsError::CapabilityNotFound { capability });
                }
                Binding::Constructing => return Err(HostsError::CapabilityCycle { capability }),
            }
        };

        // The borrow is released so the factory can resolve its own dependencies.
        let factory = factory
            .downcast::<Factory<C>>()
            .map_err(|_| HostsError::CapabilityNotFound { capability })?;
        let instance = (*factory)();

        self.bindings
            .borrow_mut()
            .insert(id, Binding::Resolved(Box::new(Rc::clone(&instance))));
        tracing::debug!(capability, "Constructed capability");
        Ok(instance)
    }

    /// Returns `true` if `C` is bound, resolved or not.
    #[must_use]
    pub fn is_registered<C>(&self) -> bool
    where
        C: ?Sized + 'static,
    {
        self.bindings.borrow().contains_key(&TypeId::of::<C>())
    }

    /// Number of bound capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("bindings", &self.len())
            .finish()
    }
}
