mod test_cart_basic;
mod test_engine_basic;
mod test_handles_basic;
