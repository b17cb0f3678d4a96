//! Adapters implementing application ports

mod graph_messenger_adapter;
mod static_page_token_resolver;

pub use graph_messenger_adapter::GraphMessengerAdapter;
pub use static_page_token_resolver::StaticPageTokenResolver;
