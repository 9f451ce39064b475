use crate::{
    InjectResult, Injector, InterfaceFor, Lifetime, RequestInfo, Svc,
    TypedProvider,
};
use std::marker::PhantomData;

/// Provides a service as an implementation of an interface. See
/// [`WithInterface::with_interface()`] for more information.
pub struct InterfaceProvider<I, P>
where
    P: TypedProvider,
    I: ?Sized + InterfaceFor<P::Result>,
{
    inner: P,
    _marker: PhantomData<fn(P::Result) -> I>,
}

impl<I, P> InterfaceProvider<I, P>
where
    P: TypedProvider,
    I: ?Sized + InterfaceFor<P::Result>,
{
    pub(crate) fn new(inner: P) -> Self {
        InterfaceProvider {
            inner,
            _marker: PhantomData,
        }
    }

    pub(crate) fn inner(&self) -> &P {
        &self.inner
    }

    pub(crate) fn into_inner(self) -> P {
        self.inner
    }
}

impl<I, P> TypedProvider for InterfaceProvider<I, P>
where
    P: TypedProvider,
    I: ?Sized + InterfaceFor<P::Result>,
{
    type Interface = I;
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

/// Defines a conversion into an interface provider. This trait is
/// automatically implemented for all types that implement [`TypedProvider`].
pub trait WithInterface: TypedProvider {
    /// Provides this service as an implementation of a particular interface.
    /// Rather than requesting this service with its concrete type, it is
    /// instead requested by its interface type. Once a service is bound to an
    /// interface, it can no longer be requested by its concrete type.
    ///
    /// To bind the same service to several interfaces at once, follow this
    /// with [`and_interface`](InterfaceProvider::and_interface).
    ///
    /// ## Example
    ///
    /// ```
    /// use multibind::{
    ///     interface, Injector, IntoSingleton, Service, Svc, WithInterface,
    /// };
    ///
    /// trait Fooable: Service {
    ///     fn bar(&self) {}
    /// }
    ///
    /// interface!(Fooable);
    ///
    /// #[derive(Default)]
    /// struct Foo;
    /// impl Fooable for Foo {}
    ///
    /// let mut builder = Injector::builder();
    /// builder.provide(Foo::default.singleton().with_interface::<dyn Fooable>());
    ///
    /// // Foo can now be requested through its interface of `dyn Fooable`.
    /// let injector = builder.build();
    /// let fooable: Svc<dyn Fooable> = injector.get().unwrap();
    /// fooable.bar();
    ///
    /// // It can't be requested through its original type
    /// assert!(injector.get::<Svc<Foo>>().is_err());
    /// ```
    fn with_interface<I: ?Sized + InterfaceFor<Self::Result>>(
        self,
    ) -> InterfaceProvider<I, Self>;
}

impl<P> WithInterface for P
where
    P: TypedProvider,
{
    fn with_interface<I: ?Sized + InterfaceFor<Self::Result>>(
        self,
    ) -> InterfaceProvider<I, Self> {
        InterfaceProvider::new(self)
    }
}
