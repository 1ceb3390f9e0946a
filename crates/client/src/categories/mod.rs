//! Category facades: one method per bound endpoint.
//!
//! A facade borrows the client and carries a cancellation token used by every
//! call made through it. Bindings only build the request, dispatch it and map
//! the response; failures propagate unchanged.

mod ads;
mod messages;
mod orders;
mod secure;
mod wall;

pub use ads::Ads;
pub use messages::Messages;
pub use orders::Orders;
pub use secure::Secure;
pub use wall::Wall;

/// Declares a facade struct and one async method per `name => Request` pair
macro_rules! facade {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$fn_meta:meta])*
                $fn_name:ident => $request:ty;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name<'a> {
            api: &'a $crate::client::VkApi,
            cancel: ::tokio_util::sync::CancellationToken,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(api: &'a $crate::client::VkApi) -> Self {
                Self {
                    api,
                    cancel: ::tokio_util::sync::CancellationToken::new(),
                }
            }

            /// Use `cancel` for every call made through this facade
            pub fn with_cancellation(mut self, cancel: ::tokio_util::sync::CancellationToken) -> Self {
                self.cancel = cancel;
                self
            }

            $(
                $(#[$fn_meta])*
                pub async fn $fn_name(
                    &self,
                    request: &$request,
                ) -> ::vkapi_core::Result<<$request as ::vkapi_core::ApiRequest>::Output> {
                    self.api.invoke(request, &self.cancel).await
                }
            )*
        }
    };
}

pub(crate) use facade;
