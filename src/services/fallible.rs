use crate::{
    InjectError, InjectResult, Injector, RequestInfo, Service, ServiceFactory,
    ServiceInfo,
};
use std::{error::Error, marker::PhantomData};

/// Wraps a service factory whose constructor returns a [`Result<T, E>`].
///
/// When the inner factory returns `Err`, the error is boxed and surfaced as
/// [`InjectError::ActivationFailed`] naming the service that failed to
/// construct. When it returns `Ok`, the service is injected unwrapped, so a
/// factory returning `Result<T, E>` satisfies requests for `Svc<T>`.
pub struct FallibleServiceFactory<D, R, E, F>
where
    D: Service,
    R: Service,
    E: Service + Error,
    F: ServiceFactory<D, Result = Result<R, E>>,
{
    inner: F,
    marker: PhantomData<fn(D) -> InjectResult<Result<R, E>>>,
}

impl<D, R, E, F> ServiceFactory<D> for FallibleServiceFactory<D, R, E, F>
where
    D: Service,
    R: Service,
    E: Service + Error,
    F: ServiceFactory<D, Result = Result<R, E>>,
{
    type Result = R;

    fn invoke(
        &self,
        injector: &Injector,
        request_info: &RequestInfo,
    ) -> InjectResult<Self::Result> {
        self.inner.invoke(injector, request_info)?.map_err(|error| {
            InjectError::ActivationFailed {
                service_info: ServiceInfo::of::<R>(),
                inner: Box::new(error),
            }
        })
    }
}

/// Defines a conversion into a fallible service factory. This trait is
/// automatically implemented for all service factories that return a
/// [`Result<T, E>`] with an error type that implements [`Error`] and
/// [`Service`].
pub trait IntoFallible<D, R, E, F>
where
    D: Service,
    R: Service,
    E: Service + Error,
    F: ServiceFactory<D, Result = Result<R, E>>,
{
    /// Marks a service factory as fallible. The resulting factory can be
    /// handed to any of the lifetime conversions, and the service it provides
    /// is the `Ok` type of the constructor's result.
    ///
    /// ## Example
    ///
    /// ```
    /// use multibind::{
    ///     InjectError, InjectResult, Injector, IntoFallible, IntoSingleton, Svc,
    /// };
    /// use std::{
    ///     error::Error,
    ///     fmt::{Display, Formatter},
    /// };
    ///
    /// #[derive(Debug)]
    /// struct MissingUrl;
    ///
    /// impl Error for MissingUrl {}
    /// impl Display for MissingUrl {
    ///     fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    ///         write!(f, "no database url is configured")
    ///     }
    /// }
    ///
    /// struct Database;
    /// impl Database {
    ///     fn connect() -> Result<Database, MissingUrl> {
    ///         Err(MissingUrl)
    ///     }
    /// }
    ///
    /// let mut builder = Injector::builder();
    /// builder.provide(Database::connect.fallible().singleton());
    ///
    /// let injector = builder.build();
    /// let database: InjectResult<Svc<Database>> = injector.get();
    /// match database {
    ///     Err(InjectError::ActivationFailed { .. }) => {}
    ///     Err(error) => Err(error).unwrap(),
    ///     _ => unreachable!("connecting should have failed"),
    /// }
    /// ```
    #[must_use]
    fn fallible(self) -> FallibleServiceFactory<D, R, E, F>;
}

impl<D, R, E, F> IntoFallible<D, R, E, F> for F
where
    D: Service,
    R: Service,
    E: Service + Error,
    F: ServiceFactory<D, Result = Result<R, E>>,
{
    fn fallible(self) -> FallibleServiceFactory<D, R, E, F> {
        FallibleServiceFactory {
            inner: self,
            marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constant, IntoTransient, Svc};
    use std::fmt::{Display, Formatter};

    #[derive(Debug, PartialEq, Eq)]
    struct ParseError(String);

    impl Error for ParseError {}

    impl Display for ParseError {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "invalid port: {}", self.0)
        }
    }

    struct Port(u16);

    fn parse_port(raw: Svc<String>) -> Result<Port, ParseError> {
        raw.parse()
            .map(Port)
            .map_err(|_| ParseError(raw.as_str().to_owned()))
    }

    /// A successful constructor injects the unwrapped value.
    #[test]
    fn fallible_factory_provides_ok_values() {
        let mut builder = Injector::builder();
        builder.provide(parse_port.fallible().transient());
        builder.provide(constant("8080".to_owned()));

        let injector = builder.build();
        let port: Svc<Port> = injector.get().unwrap();
        assert_eq!(8080, port.0);
    }

    /// A failed constructor surfaces the original error boxed inside
    /// the activation error.
    #[test]
    fn fallible_factory_carries_the_constructor_error() {
        let mut builder = Injector::builder();
        builder.provide(parse_port.fallible().transient());
        builder.provide(constant("not-a-port".to_owned()));

        let injector = builder.build();
        match injector.get::<Svc<Port>>() {
            Err(InjectError::ActivationFailed {
                service_info,
                inner,
            }) => {
                assert_eq!(ServiceInfo::of::<Port>(), service_info);
                let parse_error =
                    inner.downcast_ref::<ParseError>().unwrap();
                assert_eq!(
                    &ParseError("not-a-port".to_owned()),
                    parse_error
                );
            }
            Err(error) => Err(error).unwrap(),
            Ok(_) => unreachable!("parsing should have failed"),
        }
    }
}
