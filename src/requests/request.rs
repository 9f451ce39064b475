use crate::{InjectError, InjectResult, Injector, Interface, RequestInfo, Svc};

/// A request to an injector.
///
/// Implementations of this trait are the value shapes [`Injector::get`] can
/// produce: service pointers, optional service pointers, the injector itself,
/// the active [`RequestInfo`], and tuples of other requests.
///
/// ## Grouping requests
///
/// Tuples make several requests at once, which keeps related lookups in one
/// call and also works around the limit of 12 factory parameters. Requesting
/// two interfaces bound to the same service returns two pointers to the one
/// underlying instance:
///
/// ```
/// use multibind::{interface, Injector, IntoSingleton, Service, Svc, WithInterface};
///
/// trait Reader: Service {}
/// trait Writer: Service {}
/// interface!(Reader);
/// interface!(Writer);
///
/// #[derive(Default)]
/// struct FileStore;
/// impl Reader for FileStore {}
/// impl Writer for FileStore {}
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
/// let (_reader, _writer): (Svc<dyn Reader>, Svc<dyn Writer>) =
///     injector.get().unwrap();
/// ```
pub trait Request: Sized {
    /// Performs the request to the injector.
    fn request(injector: &Injector, info: &RequestInfo) -> InjectResult<Self>;
}

/// Requests a clone of the injector handle, sharing its scope.
impl Request for Injector {
    #[inline]
    fn request(injector: &Injector, _info: &RequestInfo) -> InjectResult<Self> {
        Ok(injector.clone())
    }
}

/// Requests the path of the request currently being resolved.
impl Request for RequestInfo {
    #[inline]
    fn request(_injector: &Injector, info: &RequestInfo) -> InjectResult<Self> {
        Ok(info.clone())
    }
}

/// Requests a service pointer to the service registered under the given key.
impl<S: ?Sized + Interface> Request for Svc<S> {
    #[inline]
    fn request(injector: &Injector, info: &RequestInfo) -> InjectResult<Self> {
        injector.get_service(info)
    }
}

/// Requests a service pointer if the key has a provider. Produces `None` when
/// nothing is registered under the key rather than failing the request; any
/// other failure is still an error.
impl<S: ?Sized + Interface> Request for Option<Svc<S>> {
    #[inline]
    fn request(injector: &Injector, info: &RequestInfo) -> InjectResult<Self> {
        match injector.get_with(info) {
            Ok(response) => Ok(Some(response)),
            Err(InjectError::MissingProvider { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

macro_rules! impl_tuple_request {
    () => {
        impl_tuple_request!(@impl ());
    };
    ($first:ident $(, $rest:ident)*) => {
        impl_tuple_request!(@impl ($first $(, $rest)*));
        impl_tuple_request!($($rest),*);
    };
    (@impl ($($type_name:ident),*)) => {
        /// Performs multiple requests at once. This is useful for grouping
        /// together related requests.
        impl <$($type_name),*> Request for ($($type_name,)*)
        where
            $($type_name: Request,)*
        {
            #[allow(unused_variables)]
            fn request(injector: &Injector, info: &RequestInfo) -> InjectResult<Self> {
                let result = ($(injector.get_with::<$type_name>(info)?,)*);
                Ok(result)
            }
        }
    };
}

impl_tuple_request!(T0, T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
