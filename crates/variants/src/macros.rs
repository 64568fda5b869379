//! Registration macros for contracts, variants and variant sources.

/// Helper macro for optional values with defaults.
#[doc(hidden)]
#[macro_export]
macro_rules! __variant_opt {
	({$val:expr}, $default:expr) => {
		$val
	};
	(, $default:expr) => {
		$default
	};
}

/// Implements [`Contract`](crate::Contract) for `dyn $trait`.
///
/// Invoke next to the trait definition. The trait must have `Any` as a
/// supertrait. The registry is built once, on the first call to
/// `<dyn $trait as Contract>::registry()`.
///
/// # Example
///
/// ```ignore
/// pub trait NameGenerator: Any {
///     fn generate_name(&self, gender: NameGender) -> String;
/// }
///
/// contract!(NameGenerator);
/// ```
#[macro_export]
macro_rules! contract {
	($trait:ident) => {
		impl $crate::Contract for dyn $trait {
			const NAME: &'static str = stringify!($trait);

			fn registry() -> &'static $crate::Registry<Self> {
				static REGISTRY: ::std::sync::LazyLock<$crate::Registry<dyn $trait>> =
					::std::sync::LazyLock::new(|| {
						$crate::RegistryBuilder::new(stringify!($trait))
							.extend_inventory()
							.extend_sources()
							.build()
					});
				&REGISTRY
			}

			fn as_any(&self) -> &dyn ::std::any::Any {
				self
			}

			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}
		}
	};
}

/// Registers a concrete implementation of a contract.
///
/// The type must implement `Default` unless a `factory` is given.
///
/// # Examples
///
/// ```ignore
/// // Default-constructed, marked as the contract's default
/// variant!(NameGenerator, StandardNameGenerator, {
///     description: "Samples given, middle and family names from pools",
///     default: true,
/// });
///
/// // Custom fallible factory
/// variant!(NameGenerator, RemoteNameGenerator, {
///     description: "Names fetched from a service",
///     factory: || Err(FactoryError::failed("service unavailable")),
/// });
/// ```
#[macro_export]
macro_rules! variant {
	($contract:path, $ty:ident, {
		description: $desc:expr
		$(, default: $default:expr)?
		$(, factory: $factory:expr)?
		$(,)?
	}) => {
		$crate::paste::paste! {
			#[allow(non_upper_case_globals)]
			static [<VARIANT_ $ty:upper>]: $crate::VariantDef<dyn $contract> = $crate::VariantDef::new(
				$crate::RegistryMeta::new(
					concat!(env!("CARGO_PKG_NAME"), "::", stringify!($ty)),
					stringify!($ty),
					$desc,
					$crate::RegistrySource::Crate(env!("CARGO_PKG_NAME")),
				),
				::std::any::TypeId::of::<$ty>,
				$crate::VariantKind::Concrete($crate::__variant_opt!($({$factory})?, {
					fn [<__make_ $ty:snake>]() -> ::std::result::Result<::std::boxed::Box<dyn $contract>, $crate::FactoryError> {
						::std::result::Result::Ok(::std::boxed::Box::new(<$ty as ::std::default::Default>::default()))
					}
					[<__make_ $ty:snake>]
				})),
			)
			.with_default($crate::__variant_opt!($({$default})?, false));

			$crate::inventory::submit! {
				$crate::VariantReg::new(&[<VARIANT_ $ty:upper>])
			}
		}
	};
}

/// Registers a fallible source of variant definitions for a contract.
///
/// # Example
///
/// ```ignore
/// fn plugin_generators() -> Result<Vec<&'static VariantDef<dyn NameGenerator>>, DiscoveryError> {
///     Err(DiscoveryError::new("plugins", "manifest missing"))
/// }
///
/// variant_source!(NameGenerator, plugins, plugin_generators);
/// ```
#[macro_export]
macro_rules! variant_source {
	($contract:path, $name:ident, $discover:expr) => {
		$crate::paste::paste! {
			#[allow(non_upper_case_globals)]
			static [<VARIANT_SOURCE_ $name:upper>]: $crate::VariantSourceDef<dyn $contract> =
				$crate::VariantSourceDef::new(stringify!($name), $discover);

			$crate::inventory::submit! {
				$crate::SourceReg::new(&[<VARIANT_SOURCE_ $name:upper>])
			}
		}
	};
}
