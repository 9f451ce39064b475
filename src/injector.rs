use crate::{
    DynSvc, InjectError, InjectResult, InjectorBuilder, Interface, ProviderMap,
    Request, RequestInfo, Service, ServiceInfo, Svc,
};
use std::{
    collections::HashMap,
    fmt::{Debug, Formatter},
    sync::atomic::{AtomicU64, Ordering},
};

/// Identity of a scoped registration. Each scoped provider caches its
/// instances under its own slot, so separate registrations of the same
/// concrete type stay separate in the scope cache.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct ScopeSlot(u64);

impl ScopeSlot {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ScopeSlot(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Instances created by scoped providers, keyed by their registration.
#[derive(Default)]
struct ScopeCache {
    #[cfg(feature = "arc")]
    entries: std::sync::RwLock<HashMap<ScopeSlot, DynSvc>>,
    #[cfg(feature = "rc")]
    entries: std::cell::RefCell<HashMap<ScopeSlot, DynSvc>>,
}

/// A runtime dependency injection container. This holds all the bindings
/// between service keys and their providers and the instances cached for the
/// current scope.
///
/// # Scopes
///
/// An injector is itself a scope. [`Injector::create_scope`] creates a child
/// injector which shares the provider registrations and all singleton state
/// with its parent but caches scoped services independently:
///
/// ```
/// use multibind::{Injector, IntoScoped, IntoSingleton, Svc};
///
/// #[derive(Default)]
/// struct Connection;
///
/// #[derive(Default)]
/// struct Config;
///
/// let mut builder = Injector::builder();
/// builder.provide(Connection::default.scoped());
/// builder.provide(Config::default.singleton());
///
/// let injector = builder.build();
/// let scope = injector.create_scope();
///
/// // Each scope gets its own connection, but configuration is shared.
/// let root_conn: Svc<Connection> = injector.get().unwrap();
/// let scoped_conn: Svc<Connection> = scope.get().unwrap();
/// assert!(!Svc::ptr_eq(&root_conn, &scoped_conn));
///
/// let root_config: Svc<Config> = injector.get().unwrap();
/// let scoped_config: Svc<Config> = scope.get().unwrap();
/// assert!(Svc::ptr_eq(&root_config, &scoped_config));
/// ```
///
/// # Injecting the injector
///
/// Cloning the injector does not clone the providers inside of it. Instead,
/// both injectors will use the same providers and the same scope cache,
/// meaning that an injector can be passed to a service as a dependency. The
/// injector can be requested as itself without using a service pointer. It
/// does not need to be registered as a dependency in the builder beforehand.
///
/// Note that requesting the injector inside of your services is generally bad
/// practice, and is known as the service locator antipattern. This is mostly
/// useful for service factories where you can create instances of your
/// services on demand.
///
/// ```
/// use multibind::{Injector, Svc, IntoTransient, IntoSingleton, constant, InjectResult};
/// use std::sync::Mutex;
///
/// struct FloatFactory(Injector);
///
/// impl FloatFactory {
///     pub fn new(injector: Injector) -> Self {
///         FloatFactory(injector)
///     }
///
///     pub fn get(&self) -> InjectResult<f32> {
///         let int: Svc<i32> = self.0.get()?;
///         Ok(*int as f32)
///     }
/// }
///
/// fn count(counter: Svc<Mutex<i32>>) -> i32 {
///     let mut counter = counter.lock().unwrap();
///     *counter += 1;
///     *counter
/// }
///
/// let mut builder = Injector::builder();
/// builder.provide(constant(Mutex::new(0i32)));
/// builder.provide(count.transient());
/// builder.provide(FloatFactory::new.singleton());
///
/// let injector = builder.build();
/// let float_factory: Svc<FloatFactory> = injector.get().unwrap();
/// let value1 = float_factory.get().unwrap();
/// let value2 = float_factory.get().unwrap();
///
/// assert_eq!(1.0, value1);
/// assert_eq!(2.0, value2);
/// ```
#[derive(Clone)]
pub struct Injector {
    providers: Svc<ProviderMap>,
    scope: Svc<ScopeCache>,
}

impl Injector {
    /// Creates a builder for this injector. This is the preferred way of
    /// creating an injector.
    #[must_use]
    pub fn builder() -> InjectorBuilder {
        InjectorBuilder::default()
    }

    /// Creates a new injector directly from its providers. Prefer
    /// [`Injector::builder()`] for creating new injectors instead.
    #[must_use]
    pub fn new(providers: ProviderMap) -> Self {
        Injector {
            providers: Svc::new(providers),
            scope: Svc::new(ScopeCache::default()),
        }
    }

    /// Creates a child injector that shares this injector's providers and
    /// singletons but caches scoped services independently. The new scope
    /// starts empty; scoped services are constructed again on their first
    /// request from the new scope.
    #[must_use]
    pub fn create_scope(&self) -> Injector {
        Injector {
            providers: self.providers.clone(),
            scope: Svc::new(ScopeCache::default()),
        }
    }

    /// Performs a request for a service. Several types of requests can be
    /// made to the container by default:
    ///
    /// - [`Svc<T>`](crate::Svc): Requests a service pointer to the service
    ///   registered under the key `T` (a concrete type or a `dyn Trait`
    ///   interface) and creates an instance of the service if needed.
    /// - `Option<Svc<T>>`: Like `Svc<T>`, but returns `Ok(None)` rather than
    ///   an error if no provider is registered for `T`.
    /// - [`Injector`]: Requests a clone of the injector. While it doesn't
    ///   make much sense to request this directly from the injector itself,
    ///   this allows the injector to be requested as a dependency inside of
    ///   services (for instance, factories).
    /// - [`RequestInfo`]: Requests the current request path.
    ///
    /// See the [documentation for `Request`](Request) for more information on
    /// what can be requested.
    ///
    /// ```
    /// use multibind::{Injector, Svc, IntoSingleton};
    ///
    /// #[derive(Default)]
    /// struct Bar;
    ///
    /// let mut builder = Injector::builder();
    /// builder.provide(Bar::default.singleton());
    ///
    /// let injector = builder.build();
    /// let _bar: Svc<Bar> = injector.get().unwrap();
    /// ```
    ///
    /// Requests for `dyn Trait` interface types resolve the implementation
    /// the interface was bound to. For example, if `dyn Foo`'s registered
    /// implementation is the service type `Bar`, then a request for a service
    /// pointer of `dyn Foo` will return a service pointer to a `Bar`,
    /// although the return type will be `Svc<dyn Foo>`.
    ///
    /// ```
    /// use multibind::{interface, Injector, Service, Svc, IntoSingleton, WithInterface};
    ///
    /// trait Foo: Service {}
    /// interface!(Foo);
    ///
    /// #[derive(Default)]
    /// struct Bar;
    /// impl Foo for Bar {}
    ///
    /// let mut builder = Injector::builder();
    /// builder.provide(Bar::default.singleton().with_interface::<dyn Foo>());
    ///
    /// let injector = builder.build();
    /// let _bar: Svc<dyn Foo> = injector.get().unwrap();
    /// ```
    ///
    /// Custom request types can also be used by implementing [`Request`].
    pub fn get<R: Request>(&self) -> InjectResult<R> {
        self.get_with(&RequestInfo::new())
    }

    /// Performs a request for a service with additional request information.
    /// This is useful from inside service factories and custom providers,
    /// where passing the active [`RequestInfo`] along keeps the request path
    /// (and with it cycle detection) intact.
    pub fn get_with<R: Request>(
        &self,
        info: &RequestInfo,
    ) -> InjectResult<R> {
        R::request(self, info)
    }

    pub(crate) fn get_service<S: ?Sized + Interface>(
        &self,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<S>> {
        let service_info = ServiceInfo::of::<S>();
        let registered = self
            .providers
            .get(&service_info)
            .ok_or(InjectError::MissingProvider { service_info })?;
        registered.provide_for(self, request_info)
    }

    pub(crate) fn find_scoped<R: Service>(
        &self,
        slot: ScopeSlot,
    ) -> InjectResult<Option<Svc<R>>> {
        #[cfg(feature = "arc")]
        let existing = self.scope.entries.read().unwrap().get(&slot).cloned();
        #[cfg(feature = "rc")]
        let existing = self.scope.entries.borrow().get(&slot).cloned();

        existing.map(downcast_scoped).transpose()
    }

    pub(crate) fn cache_scoped<R: Service>(
        &self,
        slot: ScopeSlot,
        service: Svc<R>,
    ) -> InjectResult<Svc<R>> {
        #[cfg(feature = "arc")]
        let stored = self
            .scope
            .entries
            .write()
            .unwrap()
            .entry(slot)
            .or_insert_with(|| service.clone() as DynSvc)
            .clone();
        #[cfg(feature = "rc")]
        let stored = self
            .scope
            .entries
            .borrow_mut()
            .entry(slot)
            .or_insert_with(|| service.clone() as DynSvc)
            .clone();

        downcast_scoped(stored)
    }
}

impl Default for Injector {
    fn default() -> Self {
        Injector::new(ProviderMap::default())
    }
}

impl Debug for Injector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut services: Vec<&str> =
            self.providers.iter().map(|entry| entry.service().name()).collect();
        services.sort_unstable();
        f.debug_struct("Injector")
            .field("services", &services)
            .finish()
    }
}

fn downcast_scoped<R: Service>(service: DynSvc) -> InjectResult<Svc<R>> {
    #[cfg(feature = "arc")]
    let result = service.downcast_arc::<R>();
    #[cfg(feature = "rc")]
    let result = service.downcast_rc::<R>();

    result.map_err(|_| {
        InjectError::InternalError(format!(
            "the scope cache entry for {} holds a different service type",
            ServiceInfo::of::<R>().name()
        ))
    })
}
