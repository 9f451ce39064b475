use crate::{ProviderMap, Registration};

/// A collection of providers that can be added all at once to an
/// [`InjectorBuilder`](crate::InjectorBuilder). Modules can be used to group
/// together related services and configure the injector in pieces rather than
/// all at once.
///
/// For creating a module easily via a domain specific language, see
/// [`define_module!`].
#[derive(Default)]
pub struct Module {
    pub(crate) providers: ProviderMap,
}

impl Module {
    /// Registers a provider, or a chain of interface bindings, with the
    /// module. Each service key holds at most one provider, so registering a
    /// provider for a key that already has one replaces the old provider.
    pub fn provide<M, R: Registration<M>>(&mut self, registration: R) {
        registration.register(&mut self.providers);
    }
}

/// Defines a new module using a domain specific language.
///
/// Repeated `services` or `interfaces` sections are merged together. Since a
/// chain of interface bindings is itself a registration, a service can be
/// bound to several interfaces at once from the `services` section by
/// chaining [`with_interface`](crate::WithInterface::with_interface) and
/// [`and_interface`](crate::InterfaceProvider::and_interface) on it.
///
/// ## Example
///
/// ```
/// use multibind::{
///     define_module, interface, Injector, IntoSingleton, IntoTransient,
///     Service, Svc,
/// };
///
/// trait Fooable: Service {}
/// interface!(Fooable);
///
/// #[derive(Default)]
/// struct Foo;
/// impl Fooable for Foo {}
///
/// #[derive(Default)]
/// struct Bar;
///
/// #[derive(Default)]
/// struct Baz;
///
/// let module = define_module! {
///     services = [
///         Bar::default.transient(),
///     ],
///     interfaces = {
///         dyn Fooable = [
///             Foo::default.singleton(),
///         ],
///     },
///
///     // Repeated sections are merged into the same module.
///     services = [
///         Baz::default.singleton(),
///     ],
/// };
///
/// let mut builder = Injector::builder();
/// builder.add_module(module);
///
/// let injector = builder.build();
/// let _bar: Svc<Bar> = injector.get().unwrap();
/// let _baz: Svc<Baz> = injector.get().unwrap();
/// let _foo: Svc<dyn Fooable> = injector.get().unwrap();
/// ```
#[macro_export]
macro_rules! define_module {
    {
        $(
            $(#[$($attr:meta),*])*
            $key:ident = $value:tt
        ),*
        $(,)?
    } => {
        {
            #[allow(unused_mut)]
            let mut module = <$crate::Module as ::std::default::Default>::default();
            $(
                $(#[$($attr),*])*
                $crate::define_module!(@provide &mut module, $key = $value);
            )*
            module
        }
    };
    (
        @provide $module:expr,
        services = [
            $($service:expr),*
            $(,)?
        ]
    ) => {
        $($module.provide($service);)*
    };
    (
        @provide $module:expr,
        interfaces = {
            $($interface:ty = [
                $($implementation:expr),*
                $(,)?
            ]),*
            $(,)?
        }
    ) => {
        $(
            $($module.provide($crate::WithInterface::with_interface::<$interface>($implementation));)*
        )*
    };
}
