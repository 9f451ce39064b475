use crate::{Injector, Module, ProviderMap, RegisteredProvider, Registration};

/// A builder for an [`Injector`].
#[derive(Default)]
pub struct InjectorBuilder {
    providers: ProviderMap,
}

impl InjectorBuilder {
    /// Registers a provider, or a chain of interface bindings, with the
    /// injector. Each service key holds at most one provider, so registering
    /// a provider for a key that already has one replaces the old provider.
    pub fn provide<M, R: Registration<M>>(&mut self, registration: R) {
        registration.register(&mut self.providers);
    }

    /// Adds all the providers registered in a module. Keys registered by the
    /// module replace any providers already assigned to those keys.
    pub fn add_module(&mut self, module: Module) {
        self.providers.merge(module.providers);
    }

    /// Iterates over the providers registered so far, in no particular order.
    /// Each entry exposes the service key, the implementation type bound to
    /// it, and the lifetime the service was registered with.
    ///
    /// ```
    /// use multibind::{
    ///     interface, Injector, IntoSingleton, Lifetime, Service, ServiceInfo,
    ///     WithInterface,
    /// };
    ///
    /// trait Logger: Service {}
    /// interface!(Logger);
    ///
    /// #[derive(Default)]
    /// struct FileLogger;
    /// impl Logger for FileLogger {}
    ///
    /// let mut builder = Injector::builder();
    /// builder
    ///     .provide(FileLogger::default.singleton().with_interface::<dyn Logger>());
    ///
    /// let registered = builder
    ///     .registered_providers()
    ///     .find(|registered| registered.service() == ServiceInfo::of::<dyn Logger>())
    ///     .unwrap();
    /// assert_eq!(ServiceInfo::of::<FileLogger>(), registered.implementation());
    /// assert_eq!(Lifetime::Singleton, registered.lifetime());
    /// ```
    pub fn registered_providers(
        &self,
    ) -> impl Iterator<Item = &RegisteredProvider> {
        self.providers.iter()
    }

    /// Builds the injector.
    #[must_use]
    pub fn build(self) -> Injector {
        Injector::new(self.providers)
    }
}
