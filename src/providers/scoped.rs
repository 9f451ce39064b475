use crate::{
    injector::ScopeSlot, InjectResult, Injector, Lifetime, RequestInfo,
    Service, ServiceFactory, ServiceInfo, Svc, TypedProvider,
};
use std::marker::PhantomData;

/// A service provider that creates one instance of the service per scope.
/// The service is created on its first request within a scope, and any later
/// requests from the same scope return service pointers to that instance.
/// Requests from other scopes create their own instances.
///
/// Each scoped provider caches under its own registration identity, so two
/// separately registered scoped providers of the same concrete type do not
/// share instances. A provider bound to several interfaces through
/// [`and_interface`](crate::InterfaceProvider::and_interface) is a single
/// registration and does share its per-scope instance between its keys.
pub struct ScopedProvider<D, R, F>
where
    R: Service,
    F: ServiceFactory<D, Result = R>,
{
    factory: F,
    slot: ScopeSlot,
    marker: PhantomData<fn(D) -> R>,
}

impl<D, R, F> ScopedProvider<D, R, F>
where
    R: Service,
    F: ServiceFactory<D, Result = R>,
{
    /// Creates a new [`ScopedProvider`] using a service factory.
    #[must_use]
    pub fn new(func: F) -> Self {
        ScopedProvider {
            factory: func,
            slot: ScopeSlot::next(),
            marker: PhantomData,
        }
    }
}

impl<D, R, F> TypedProvider for ScopedProvider<D, R, F>
where
    D: Service,
    R: Service,
    F: Service + ServiceFactory<D, Result = R>,
{
    type Interface = R;
    type Result = R;

    fn lifetime(&self) -> Lifetime {
        Lifetime::Scoped
    }

    fn provide_typed(
        &self,
        injector: &Injector,
        request_info: &RequestInfo,
    ) -> InjectResult<Svc<Self::Result>> {
        let request_info =
            request_info.with_request(ServiceInfo::of::<Self::Result>())?;

        if let Some(existing) = injector.find_scoped::<R>(self.slot)? {
            return Ok(existing);
        }

        // The cache is not held while the factory runs. If construction
        // re-enters this slot, the first insertion wins and this result is
        // discarded.
        let result = self.factory.invoke(injector, &request_info)?;
        injector.cache_scoped(self.slot, Svc::new(result))
    }
}

/// Defines a conversion into a scoped provider. This trait is automatically
/// implemented for all service factories.
pub trait IntoScoped<D, R, F>
where
    R: Service,
    F: ServiceFactory<D, Result = R>,
{
    /// Creates a scoped provider. Scoped providers create their values once
    /// per scope and reuse that value for future requests from the same
    /// scope. The root injector counts as a scope of its own.
    ///
    /// ## Example
    ///
    /// ```
    /// use multibind::{Injector, IntoScoped, Svc};
    ///
    /// #[derive(Default)]
    /// struct Foo;
    ///
    /// let mut builder = Injector::builder();
    /// builder.provide(Foo::default.scoped());
    ///
    /// let injector = builder.build();
    /// let foo1: Svc<Foo> = injector.get().unwrap();
    /// let foo2: Svc<Foo> = injector.get().unwrap();
    /// assert!(Svc::ptr_eq(&foo1, &foo2));
    ///
    /// let scope = injector.create_scope();
    /// let foo3: Svc<Foo> = scope.get().unwrap();
    /// assert!(!Svc::ptr_eq(&foo1, &foo3));
    /// ```
    #[must_use]
    fn scoped(self) -> ScopedProvider<D, R, F>;
}

impl<D, R, F> IntoScoped<D, R, F> for F
where
    R: Service,
    F: ServiceFactory<D, Result = R>,
{
    fn scoped(self) -> ScopedProvider<D, R, F> {
        ScopedProvider::new(self)
    }
}

impl<D, R, F> From<F> for ScopedProvider<D, R, F>
where
    R: Service,
    F: ServiceFactory<D, Result = R>,
{
    fn from(func: F) -> Self {
        func.scoped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(PartialEq, Eq, Debug)]
    struct Foo(i32);

    /// Scoped provider provides the correct value.
    #[test]
    fn scoped_provider_provides_correct_value() {
        let mut builder = Injector::builder();
        builder.provide((|| Foo(42)).scoped());

        let injector = builder.build();
        let foo: Svc<Foo> = injector.get().unwrap();
        assert_eq!(&*foo, &Foo(42));
    }

    /// Each scope caches its own instance.
    #[test]
    fn scoped_provider_caches_per_scope() {
        let mut builder = Injector::builder();
        builder.provide((|| Foo(0)).scoped());

        let injector = builder.build();
        let root1: Svc<Foo> = injector.get().unwrap();
        let root2: Svc<Foo> = injector.get().unwrap();
        assert!(Svc::ptr_eq(&root1, &root2));

        let scope = injector.create_scope();
        let scoped1: Svc<Foo> = scope.get().unwrap();
        let scoped2: Svc<Foo> = scope.get().unwrap();
        assert!(Svc::ptr_eq(&scoped1, &scoped2));
        assert!(!Svc::ptr_eq(&root1, &scoped1));
    }
}
