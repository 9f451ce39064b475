use crate::{
    DynSvc, InjectError, InjectResult, Injector, Interface, InterfaceFor,
    RequestInfo, Service, ServiceInfo, Svc,
};
use derive_more::Display;
use std::collections::HashMap;

/// How long a constructed service instance is reused across requests.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum Lifetime {
    /// One instance is constructed and shared for the life of the container
    /// tree.
    #[display(fmt = "singleton")]
    Singleton,

    /// One instance is constructed and shared per scope.
    #[display(fmt = "scoped")]
    Scoped,

    /// A new instance is constructed for every request.
    #[display(fmt = "transient")]
    Transient,
}

/// Weakly typed service provider.
///
/// Given an injector, this can provide an instance of an interface. This is
/// automatically implemented for all types that implement [`TypedProvider`],
/// and [`TypedProvider`] should be preferred if possible for custom service
/// providers to allow for stronger type checking.
pub trait Provider: Service {
    /// The interface this provider is providing for.
    type Interface: ?Sized + Interface;

    /// The [`ServiceInfo`] which describes the type returned by this provider.
    fn result(&self) -> ServiceInfo;

    /// Provides an instance of the service.
    fn provide(
        &self,
        injector: &Injector,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<Self::Interface>>;
}

impl<T> Provider for T
where
    T: TypedProvider,
{
    type Interface = <T as TypedProvider>::Interface;

    fn result(&self) -> ServiceInfo {
        ServiceInfo::of::<T::Result>()
    }

    fn provide(
        &self,
        injector: &Injector,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<<T as TypedProvider>::Interface>> {
        let service = self.provide_typed(injector, request_info)?;
        Ok(<<T as TypedProvider>::Interface as InterfaceFor<T::Result>>::from_svc(service))
    }
}

/// A strongly-typed service provider.
///
/// Types which implement this trait can provide strongly-typed instances of a
/// particular service type. Examples of typed providers include providers
/// created from service factories or constant providers. This should be
/// preferred over [`Provider`] for custom service providers if possible due to
/// the strong type guarantees this provides. [`Provider`] is automatically
/// implemented for all types which implement [`TypedProvider`].
///
/// ## Example
///
/// ```
/// use multibind::{
///     InjectResult, Injector, Lifetime, RequestInfo, Svc, TypedProvider,
/// };
///
/// struct Foo;
///
/// struct FooProvider;
/// impl TypedProvider for FooProvider {
///     type Interface = Foo;
///     type Result = Foo;
///
///     fn lifetime(&self) -> Lifetime {
///         Lifetime::Transient
///     }
///
///     fn provide_typed(
///         &self,
///         _injector: &Injector,
///         _request_info: &RequestInfo,
///     ) -> InjectResult<Svc<Self::Result>> {
///         Ok(Svc::new(Foo))
///     }
/// }
///
/// let mut builder = Injector::builder();
/// builder.provide(FooProvider);
///
/// let injector = builder.build();
/// let _foo: Svc<Foo> = injector.get().unwrap();
/// ```
pub trait TypedProvider:
    Sized + Provider<Interface = <Self as TypedProvider>::Interface>
{
    /// The interface this provider is providing for. For most providers this
    /// is the same as [`TypedProvider::Result`]; binding a provider to a
    /// trait object key instead is done with
    /// [`WithInterface::with_interface`](crate::WithInterface::with_interface).
    type Interface: ?Sized + InterfaceFor<Self::Result>;

    /// The type of service this can provide.
    type Result: Service;

    /// The [`Lifetime`] of the services this provider creates.
    fn lifetime(&self) -> Lifetime;

    /// Provides an instance of the service. The [`Injector`] passed in can be
    /// used to retrieve instances of any dependencies this service has.
    fn provide_typed(
        &self,
        injector: &Injector,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<Self::Result>>;
}

/// A value that can register one or more providers into a [`ProviderMap`].
///
/// This is what [`InjectorBuilder::provide`](crate::InjectorBuilder::provide)
/// accepts. It is implemented by every [`TypedProvider`] (registering that
/// provider under its own interface key) and by interface binding chains
/// created with [`and_interface`](crate::InterfaceProvider::and_interface),
/// which register a shared provider under each of their keys.
///
/// The `M` parameter only distinguishes the implementations from each other
/// and is inferred at every call site.
pub trait Registration<M> {
    /// Registers this value's providers.
    fn register(self, providers: &mut ProviderMap);
}

#[doc(hidden)]
pub struct SingleRegistration(());

impl<P: TypedProvider> Registration<SingleRegistration> for P {
    fn register(self, providers: &mut ProviderMap) {
        providers.insert(self);
    }
}

/// Type-erased slot holding the provider registered for a single service key.
///
/// The slot is stored as a [`DynSvc`] and recovered by downcasting to the
/// requested key's cell type, which is exact by construction.
struct ProviderCell<I: ?Sized + Interface> {
    provider: Svc<dyn Provider<Interface = I>>,
}

/// A single service registration: one service key bound to one provider.
pub struct RegisteredProvider {
    service: ServiceInfo,
    implementation: ServiceInfo,
    lifetime: Lifetime,
    cell: DynSvc,
}

impl RegisteredProvider {
    /// The service key this registration is stored under.
    #[must_use]
    pub fn service(&self) -> ServiceInfo {
        self.service
    }

    /// The concrete type constructed by the registered provider.
    #[must_use]
    pub fn implementation(&self) -> ServiceInfo {
        self.implementation
    }

    /// The lifetime of the registered provider.
    #[must_use]
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub(crate) fn provide_for<S: ?Sized + Interface>(
        &self,
        injector: &Injector,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<S>> {
        #[cfg(feature = "arc")]
        let cell = self.cell.clone().downcast_arc::<ProviderCell<S>>();
        #[cfg(feature = "rc")]
        let cell = self.cell.clone().downcast_rc::<ProviderCell<S>>();

        let cell = cell.map_err(|_| {
            InjectError::InternalError(format!(
                "the provider slot for {} does not match its service key",
                self.service.name()
            ))
        })?;
        cell.provider.provide(injector, request_info)
    }
}

/// Maps service keys to the providers registered for them.
///
/// The map is written through [`Registration`] implementations and consumed
/// by [`InjectorBuilder::build`](crate::InjectorBuilder::build). Each key
/// holds exactly one provider; registering a key again replaces the earlier
/// registration.
#[derive(Default)]
pub struct ProviderMap {
    entries: HashMap<ServiceInfo, RegisteredProvider>,
}

impl ProviderMap {
    /// Registers a provider under its interface key, replacing any provider
    /// previously registered under the same key.
    pub fn insert<P: TypedProvider>(&mut self, provider: P) {
        let service = ServiceInfo::of::<<P as TypedProvider>::Interface>();
        let implementation = provider.result();
        let lifetime = provider.lifetime();
        let provider: Svc<
            dyn Provider<Interface = <P as TypedProvider>::Interface>,
        > = Svc::new(provider);
        self.entries.insert(
            service,
            RegisteredProvider {
                service,
                implementation,
                lifetime,
                cell: Svc::new(ProviderCell { provider }),
            },
        );
    }

    pub(crate) fn get(
        &self,
        service_info: &ServiceInfo,
    ) -> Option<&RegisteredProvider> {
        self.entries.get(service_info)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &RegisteredProvider> {
        self.entries.values()
    }

    pub(crate) fn merge(&mut self, other: ProviderMap) {
        self.entries.extend(other.entries);
    }
}
