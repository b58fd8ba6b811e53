pub mod confirmation_gateway;
