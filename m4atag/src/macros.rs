macro_rules! try_vec {
	($slice:expr) => {{ $crate::util::alloc::fallible_vec_from_slice($slice)? }};
}

// Shorthand for return Err(M4aTagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(M4aTagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(M4aTagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::M4aTagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::M4aTagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for M4aTagError::malformed(ident, "Message")
//
// Usage:
//
// - malformed!(ident, Message)
//
// or bail:
//
// - malformed!(@BAIL ident, Message)
macro_rules! malformed {
	($ident:expr, $reason:literal) => {
		crate::error::M4aTagError::malformed($ident, $reason)
	};
	(@BAIL $ident:expr, $reason:literal) => {
		return Err(malformed!($ident, $reason))
	};
}

// A macro for handling the different `ParsingMode`s
//
// NOTE: If `STRICT` is missing, it will fall through to `DEFAULT`.
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		$(STRICT: $strict_handler:expr,)?
		DEFAULT: $default:expr
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

pub(crate) use {err, malformed, parse_mode_choice, try_vec};
