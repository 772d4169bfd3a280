use std::any::Any;

/// A value that member accessors can write into.
///
/// Types that embed a "supertype" part expose it through [`Reflect::super_mut`],
/// which lets members declared on the supertype reach it inside a subtype
/// instance.
pub trait Reflect: Any {
	fn as_any_mut(&mut self) -> &mut dyn Any;

	/// The embedded supertype part, if any.
	fn super_mut(&mut self) -> Option<&mut dyn Reflect> {
		None
	}
}

/// Finds the `C` part of `target`, walking supertype parts outward.
pub fn locate<C: Any>(target: &mut dyn Reflect) -> Option<&mut C> {
	if target.as_any_mut().is::<C>() {
		return target.as_any_mut().downcast_mut::<C>();
	}
	target.super_mut().and_then(locate::<C>)
}

/// Implements [`Reflect`] for a type, optionally naming the field that holds its
/// supertype part.
#[macro_export]
macro_rules! impl_reflect {
	($ty:ty) => {
		impl $crate::Reflect for $ty {
			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}
		}
	};
	($ty:ty => $base:ident) => {
		impl $crate::Reflect for $ty {
			fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
				self
			}

			fn super_mut(&mut self) -> Option<&mut dyn $crate::Reflect> {
				Some(&mut self.$base)
			}
		}
	};
}
