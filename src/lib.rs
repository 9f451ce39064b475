//! # Runtime dependency injection with multi-interface bindings.
//!
//! By default, services provided by the [`Injector`] use thread-safe pointers.
//! This is because [`Arc<T>`](std::sync::Arc) is used to hold instances of the
//! services. This can be changed to [`Rc<T>`](std::rc::Rc) by disabling
//! default features and enabling the "rc" feature:
//!
//! ```text
//! [dependencies.multibind]
//! version = "*" # Replace with the version you want to use
//! default-features = false
//! features = ["rc"]
//! ```
//!
//! ## Dependency injection at runtime (rather than compile-time)
//!
//! Runtime dependency injection allows for advanced configuration of services
//! during runtime rather than needing to decide what services your application
//! will use at compile time. This means you can read a config when your
//! application starts, decide what implementations you want to use for your
//! interfaces, and assign those at runtime. This is also slightly slower than
//! compile-time dependency injection, so if pointer indirection, dynamic
//! dispatch, or heap allocations are a concern, then a compile-time dependency
//! injection library might work better instead. However, in asynchronous,
//! I/O-based applications like a web server, the additional overhead is
//! probably insignificant compared to the additional flexibility you get with
//! multibind.
//!
//! ## Interfaces
//!
//! Using interfaces allows you to write your services without worrying about
//! how its dependencies are implemented. You can think of them like generic
//! type parameters for your service, except rather than needing to add a new
//! type parameter, you use a service pointer to the interface for your
//! dependency. This makes your code easier to read and faster to write, and
//! keeps your services decoupled from their dependencies and dependents.
//!
//! Interfaces are implemented as trait objects in multibind. For instance,
//! you may define a trait `UserDatabase` and implement it for several
//! different types. [`Svc<dyn UserDatabase>`](crate::Svc) is a
//! reference-counted service pointer to an implementation of your trait.
//! Similarly, `dyn UserDatabase` is your interface. You can read more about
//! how interfaces work and how they're created in the
//! [type-level docs](crate::Interface).
//!
//! ## Binding one service to several interfaces
//!
//! A service often implements more than one interface. A single registration
//! can bind its implementation to each of those interfaces at once by
//! chaining [`with_interface`](crate::WithInterface::with_interface) and
//! [`and_interface`](crate::InterfaceProvider::and_interface). All the
//! interfaces in the chain share one provider, so how many instances exist is
//! decided by the service's lifetime alone. A singleton bound to two
//! interfaces is a single instance shared by both keys. A scoped service is
//! one instance per scope no matter which of its keys it is resolved through.
//! A transient service is a fresh instance for every request, even through
//! the same key.
//!
//! ## Service lifetimes
//!
//! Lifetimes of services created by the [`Injector`] are controlled by the
//! [`Provider`] used to construct those services. Currently, there are four
//! built-in service provider types:
//!
//! - **[Transient](crate::TransientProvider):** A service is created each time
//!   it is requested. This will never return the same instance of a service
//!   more than once.
//! - **[Singleton](crate::SingletonProvider):** A service is created only the
//!   first time it is requested, then that single instance is reused for each
//!   future request from any scope.
//! - **[Scoped](crate::ScopedProvider):** A service is created the first time
//!   it is requested within a scope, then that instance is reused for each
//!   future request from the same scope. Each scope caches its own instances.
//! - **[Constant](crate::ConstantProvider):** Used for services that are not
//!   created using a service factory and instead can have their instance
//!   provided to the container directly. This behaves similar to singleton in
//!   that the same instance is provided each time the service is requested.
//!
//! Custom service providers can also be created by implementing either the
//! [`TypedProvider`] or [`Provider`] trait.
//!
//! ## Scopes
//!
//! An [`Injector`] is itself a scope. [`Injector::create_scope`] creates a
//! child injector which shares the providers and singletons of its parent but
//! caches scoped services separately. Scoped services act like per-scope
//! singletons, which makes them useful for request-bound state in server
//! applications.
//!
//! ## Fallible service factories
//!
//! Not all types can always be successfully created. Sometimes, creating an
//! instance of a service might fail. Rather than panicking on error, it's
//! possible to instead return a [`Result<T, E>`] from your constructors and
//! inject the result as a [`Svc<T>`]. Read more in the
//! [docs for `IntoFallible`](crate::IntoFallible).
//!
//! ## Example
//!
//! ```
//! use multibind::{
//!     constant, define_module, interface, Injector, IntoSingleton,
//!     IntoTransient, Service, Svc, WithInterface,
//! };
//! use std::error::Error;
//!
//! // Some type that represents a user
//! struct User;
//!
//! // This is our interface. In practice, multiple structs can implement this
//! // trait, and we don't care what the concrete type is most of the time in
//! // our other services as long as it implements this trait. Because of this,
//! // we're going to use dynamic dispatch later so that we can determine the
//! // concrete type at runtime (vs. generics, which are determined instead at
//! // compile time).
//! trait DataService: Service {
//!     fn get_user(&self, user_id: &str) -> Option<User>;
//! }
//! interface!(DataService);
//!
//! // Audited actions are recorded through a separate, narrower interface.
//! trait AuditService: Service {
//!     fn record(&self, action: &str);
//! }
//! interface!(AuditService);
//!
//! // We can mock out the data service entirely!
//! #[derive(Default)]
//! struct MockDataService;
//! impl DataService for MockDataService {
//!     fn get_user(&self, _user_id: &str) -> Option<User> { Some(User) }
//! }
//! impl AuditService for MockDataService {
//!     fn record(&self, _action: &str) {}
//! }
//!
//! // Here's another service our application uses. This service depends on
//! // our data service, however it doesn't care how that service is actually
//! // implemented as long as it works. Because of that, we're using dynamic
//! // dispatch to allow the implementation to be determined at runtime.
//! struct UserService {
//!     data_service: Svc<dyn DataService>,
//!     audit_service: Svc<dyn AuditService>,
//! }
//!
//! impl UserService {
//!     // This is just a normal constructor. The only requirement is that
//!     // each parameter is a valid injectable dependency.
//!     pub fn new(
//!         data_service: Svc<dyn DataService>,
//!         audit_service: Svc<dyn AuditService>,
//!     ) -> Self {
//!         UserService { data_service, audit_service }
//!     }
//!
//!     pub fn get_user(&self, user_id: &str) -> Option<User> {
//!         // UserService doesn't care how the user is actually retrieved
//!         self.audit_service.record("get_user");
//!         self.data_service.get_user(user_id)
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     // This is where we register our services. Each call to `.provide`
//!     // adds a new service provider to our container, however nothing is
//!     // actually created until it is requested.
//!     let mut builder = Injector::builder();
//!
//!     // We can manually add providers to our builder
//!     builder.provide(UserService::new.singleton());
//!
//!     // A single registration can bind one implementation to several
//!     // interfaces. Both interfaces resolve to the same instance here
//!     // because the service is a singleton.
//!     builder.provide(
//!         MockDataService::default
//!             .singleton()
//!             .with_interface::<dyn DataService>()
//!             .and_interface::<dyn AuditService>(),
//!     );
//!
//!     struct Foo(Svc<dyn DataService>);
//!
//!     // Alternatively, modules can be used to group providers together, and
//!     // can be defined via the define_module! macro
//!     let module = define_module! {
//!         services = [
//!             // Simple tuple structs can be registered as services directly
//!             // without defining any additional constructors
//!             Foo.singleton(),
//!
//!             // Note that we can register closures as providers as well
//!             (|_: Svc<dyn DataService>| "Hello, world!").singleton(),
//!             (|_: Option<Svc<i32>>| 120.9).transient(),
//!
//!             // We can also provide constant values directly to our services
//!             constant(8usize),
//!         ],
//!     };
//!
//!     // You can easily add a module to your builder
//!     builder.add_module(module);
//!
//!     // Now that we've registered all our providers and implementations, we
//!     // can start relying on our container to create our services for us!
//!     let injector = builder.build();
//!     let user_service: Svc<UserService> = injector.get()?;
//!     let _user = user_service.get_user("john");
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![warn(missing_docs)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::doc_markdown,
    clippy::needless_doctest_main
)]

#[cfg(not(any(feature = "arc", feature = "rc")))]
compile_error!(
    "Either the 'arc' or 'rc' feature must be enabled (but not both)."
);

#[cfg(all(feature = "arc", feature = "rc"))]
compile_error!(
    "The 'arc' and 'rc' features are mutually exclusive and cannot be enabled together."
);

mod builder;
mod injector;
mod module;
mod providers;
mod requests;
mod services;

pub use builder::*;
pub use injector::*;
pub use module::*;
pub use providers::*;
pub use requests::*;
pub use services::*;
