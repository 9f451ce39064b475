use crate::{Service, Svc};

/// Indicates that a type can be used as a service key.
///
/// Each sized service type is trivially a key for itself. Trait object types
/// (`dyn Trait`) must be declared as interfaces explicitly with the
/// [`interface!`] macro before services can be registered or requested
/// through them.
pub trait Interface: Service {}

impl<T: Service> Interface for T {}

/// Marker trait that indicates that a type is an interface for another type.
///
/// Each sized type is an interface for itself, and each `dyn Trait` is an
/// interface for the types that implement it. This trait should usually be
/// implemented by the [`interface!`] macro, and is primarily used to enforce
/// stronger type checking when assigning implementations for interfaces.
pub trait InterfaceFor<S>: Interface
where
    S: Service,
{
    #[doc(hidden)]
    fn from_svc(service: Svc<S>) -> Svc<Self>;
}

impl<T: Service> InterfaceFor<T> for T {
    fn from_svc(service: Svc<T>) -> Svc<Self> {
        service
    }
}

/// Marks a trait as being an interface for other types. This means that a
/// service can be registered and requested as a `dyn Trait` rather than as
/// its concrete type.
///
/// The trait must be a subtrait of [`Service`]. With the "arc" feature
/// enabled, this makes the trait a subtrait of [`Send`] and [`Sync`] and
/// requires instances of it to have a `'static` lifetime, which is necessary
/// for the service pointers to be shared safely.
///
/// ## Example
///
/// ```
/// use multibind::{interface, Service};
///
/// struct Bar;
/// #[cfg(test)]
/// struct MockBar;
///
/// trait Foo: Service {}
/// impl Foo for Bar {}
/// #[cfg(test)]
/// impl Foo for MockBar {}
///
/// // Requests for `dyn Foo` can resolve to either `Bar` or, in a test run,
/// // `MockBar`.
/// interface!(Foo);
/// ```
#[macro_export]
macro_rules! interface {
    ($interface:tt) => {
        impl $crate::Interface for dyn $interface {}

        impl<T: $interface> $crate::InterfaceFor<T> for dyn $interface {
            fn from_svc(service: $crate::Svc<T>) -> $crate::Svc<Self> {
                service
            }
        }
    };
}
