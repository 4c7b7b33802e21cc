// src/macros.rs
#[macro_export]
macro_rules! s {
    // Empty → String::new()
    () => {
        ::std::string::String::new()
    };
    // Anything `Into<String>`: literals, consts, borrowed cells
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

