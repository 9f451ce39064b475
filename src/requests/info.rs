use crate::{InjectError, InjectResult, ServiceInfo};

/// Information about an active request.
#[derive(Clone, Debug)]
pub struct RequestInfo {
    service_path: Vec<ServiceInfo>,
}

impl RequestInfo {
    /// Creates a new, empty instance of [`RequestInfo`].
    #[must_use]
    pub fn new() -> Self {
        RequestInfo {
            service_path: Vec::new(),
        }
    }

    /// Creates a new child instance of [`RequestInfo`] with the given service
    /// appended to the end of the request path. If the service already appears
    /// in the path, the request is cyclic and [`InjectError::CycleDetected`]
    /// is returned instead, carrying the path from the first occurrence of the
    /// service back to the repeated request.
    pub fn with_request(&self, service: ServiceInfo) -> InjectResult<Self> {
        if let Some(position) =
            self.service_path.iter().position(|&visited| visited == service)
        {
            let mut cycle = self.service_path[position..].to_vec();
            cycle.push(service);
            return Err(InjectError::CycleDetected {
                service_info: service,
                cycle,
            });
        }

        let mut child = self.clone();
        child.service_path.push(service);
        Ok(child)
    }

    /// Gets the current request path, from the outermost request down to the
    /// service currently being constructed. This can be used to configure a
    /// service based on what it's being injected into.
    ///
    /// ## Example
    ///
    /// ```
    /// use multibind::{
    ///     Injector, IntoTransient, RequestInfo, ServiceInfo, Svc,
    /// };
    ///
    /// struct Foo(pub Svc<Baz>);
    /// struct Bar(pub Svc<Baz>);
    /// struct Baz(pub i32);
    ///
    /// impl Baz {
    ///     pub fn new(request_info: RequestInfo) -> Self {
    ///         let service_path = request_info.service_path();
    ///         let value = match service_path.get(0) {
    ///             Some(root) if root == &ServiceInfo::of::<Foo>() => 1,
    ///             Some(root) if root == &ServiceInfo::of::<Bar>() => 2,
    ///             _ => 0,
    ///         };
    ///
    ///         Baz(value)
    ///     }
    /// }
    ///
    /// let mut builder = Injector::builder();
    /// builder.provide(Foo.transient());
    /// builder.provide(Bar.transient());
    /// builder.provide(Baz::new.transient());
    ///
    /// let injector = builder.build();
    /// let foo: Svc<Foo> = injector.get().unwrap();
    /// let bar: Svc<Bar> = injector.get().unwrap();
    /// let baz: Svc<Baz> = injector.get().unwrap();
    /// assert_eq!(1, foo.0.0);
    /// assert_eq!(2, bar.0.0);
    /// assert_eq!(0, baz.0);
    /// ```
    #[must_use]
    pub fn service_path(&self) -> &[ServiceInfo] {
        &self.service_path
    }
}

impl Default for RequestInfo {
    fn default() -> Self {
        RequestInfo::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_request_appends_to_path() {
        struct Foo;
        struct Bar;

        let info = RequestInfo::new();
        let info = info.with_request(ServiceInfo::of::<Foo>()).unwrap();
        let info = info.with_request(ServiceInfo::of::<Bar>()).unwrap();
        assert_eq!(
            vec![ServiceInfo::of::<Foo>(), ServiceInfo::of::<Bar>()],
            info.service_path()
        );
    }

    #[test]
    fn with_request_detects_cycles() {
        struct Foo;
        struct Bar;

        let info = RequestInfo::new()
            .with_request(ServiceInfo::of::<Foo>())
            .unwrap()
            .with_request(ServiceInfo::of::<Bar>())
            .unwrap();
        match info.with_request(ServiceInfo::of::<Foo>()) {
            Err(InjectError::CycleDetected {
                service_info,
                cycle,
            }) => {
                assert_eq!(ServiceInfo::of::<Foo>(), service_info);
                assert_eq!(
                    vec![
                        ServiceInfo::of::<Foo>(),
                        ServiceInfo::of::<Bar>(),
                        ServiceInfo::of::<Foo>(),
                    ],
                    cycle
                );
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("request should have been cyclic"),
        }
    }
}
