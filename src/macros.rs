/// Unwrap a `Result` inside an `Iterator::next` returning
/// `Option<Result<_, _>>`, converting the error with `From`.
#[macro_export]
macro_rules! try_some {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => return Some(Err(From::from(e))),
        }
    };
}
