use crate::{
    InjectResult, Injector, InterfaceFor, InterfaceProvider, Lifetime,
    ProviderMap, Registration, RequestInfo, Svc, TypedProvider, WithInterface,
};
use std::marker::PhantomData;

/// A provider that can be registered under several service keys at once.
///
/// Cloning a [`SharedProvider`] clones a pointer to the underlying provider,
/// not the provider itself. Every key a shared provider is registered under
/// therefore dispatches to the same provider and the same instance cache,
/// which is what makes the instances resolved through a multi-interface
/// binding identical wherever the provider's lifetime shares them at all.
pub struct SharedProvider<P: TypedProvider> {
    inner: Svc<P>,
}

impl<P: TypedProvider> SharedProvider<P> {
    pub(crate) fn new(inner: P) -> Self {
        SharedProvider {
            inner: Svc::new(inner),
        }
    }
}

impl<P: TypedProvider> Clone for SharedProvider<P> {
    fn clone(&self) -> Self {
        SharedProvider {
            inner: self.inner.clone(),
        }
    }
}

impl<P: TypedProvider> TypedProvider for SharedProvider<P> {
    type Interface = <P as TypedProvider>::Interface;
    type Result = P::Result;

    fn lifetime(&self) -> Lifetime {
        self.inner.lifetime()
    }

    fn provide_typed(
        &self,
        injector: &Injector,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<Self::Result>> {
        self.inner.provide_typed(injector, request_info)
    }
}

/// A chain of interface bindings that share a single provider.
///
/// Created by [`InterfaceProvider::and_interface`] and extended by
/// [`InterfaceGroup::and_interface`]. Registering the group registers the
/// shared provider once under each interface key in the chain.
pub struct InterfaceGroup<A, B> {
    first: A,
    second: B,
}

#[doc(hidden)]
pub struct ChainedRegistration<M>(PhantomData<M>);

impl<A, B, M> Registration<ChainedRegistration<M>> for InterfaceGroup<A, B>
where
    A: Registration<M>,
    B: TypedProvider,
{
    fn register(self, providers: &mut ProviderMap) {
        self.first.register(providers);
        providers.insert(self.second);
    }
}

impl<I, P> InterfaceProvider<I, P>
where
    P: TypedProvider,
    I: ?Sized + InterfaceFor<P::Result>,
{
    /// Binds this provider to an additional interface. The provider is shared
    /// between all the interfaces it is bound to, so every interface in the
    /// binding resolves to the same instance wherever the provider's lifetime
    /// reuses instances at all: always for singletons, within a single scope
    /// for scoped services, and never for transients.
    ///
    /// The concrete service type itself stays unresolvable, just like with a
    /// single [`with_interface`](crate::WithInterface::with_interface)
    /// binding.
    ///
    /// ## Example
    ///
    /// ```
    /// use multibind::{
    ///     interface, Injector, IntoSingleton, Service, Svc, WithInterface,
    /// };
    ///
    /// #[derive(Default)]
    /// struct FileStore;
    ///
    /// trait Reader: Service {}
    /// trait Writer: Service {}
    /// impl Reader for FileStore {}
    /// impl Writer for FileStore {}
    ///
    /// interface!(Reader);
    /// interface!(Writer);
    ///
    /// let mut builder = Injector::builder();
    /// builder.provide(
    ///     FileStore::default
    ///         .singleton()
    ///         .with_interface::<dyn Reader>()
    ///         .and_interface::<dyn Writer>(),
    /// );
    ///
    /// let injector = builder.build();
    /// let reader: Svc<dyn Reader> = injector.get().unwrap();
    /// let writer: Svc<dyn Writer> = injector.get().unwrap();
    ///
    /// // Both interfaces are backed by the same instance.
    /// assert!(std::ptr::eq(
    ///     Svc::as_ptr(&reader) as *const (),
    ///     Svc::as_ptr(&writer) as *const (),
    /// ));
    /// ```
    pub fn and_interface<I2>(
        self,
    ) -> InterfaceGroup<
        InterfaceProvider<I, SharedProvider<P>>,
        InterfaceProvider<I2, SharedProvider<P>>,
    >
    where
        I2: ?Sized + InterfaceFor<P::Result>,
    {
        let shared = SharedProvider::new(self.into_inner());
        InterfaceGroup {
            first: shared.clone().with_interface::<I>(),
            second: shared.with_interface::<I2>(),
        }
    }
}

impl<A, I, P> InterfaceGroup<A, InterfaceProvider<I, SharedProvider<P>>>
where
    P: TypedProvider,
    I: ?Sized + InterfaceFor<P::Result>,
{
    /// Binds the shared provider to yet another interface. There is no limit
    /// on the length of the chain.
    ///
    /// ## Example
    ///
    /// ```
    /// use multibind::{
    ///     interface, Injector, IntoScoped, Service, Svc, WithInterface,
    /// };
    ///
    /// #[derive(Default)]
    /// struct FileStore;
    ///
    /// trait Reader: Service {}
    /// trait Writer: Service {}
    /// trait Flusher: Service {}
    /// impl Reader for FileStore {}
    /// impl Writer for FileStore {}
    /// impl Flusher for FileStore {}
    ///
    /// interface!(Reader);
    /// interface!(Writer);
    /// interface!(Flusher);
    ///
    /// let mut builder = Injector::builder();
    /// builder.provide(
    ///     FileStore::default
    ///         .scoped()
    ///         .with_interface::<dyn Reader>()
    ///         .and_interface::<dyn Writer>()
    ///         .and_interface::<dyn Flusher>(),
    /// );
    ///
    /// let injector = builder.build();
    /// let _reader: Svc<dyn Reader> = injector.get().unwrap();
    /// let _writer: Svc<dyn Writer> = injector.get().unwrap();
    /// let _flusher: Svc<dyn Flusher> = injector.get().unwrap();
    /// ```
    pub fn and_interface<I2>(
        self,
    ) -> InterfaceGroup<Self, InterfaceProvider<I2, SharedProvider<P>>>
    where
        I2: ?Sized + InterfaceFor<P::Result>,
    {
        let shared = self.second.inner().clone();
        InterfaceGroup {
            first: self,
            second: shared.with_interface::<I2>(),
        }
    }
}
