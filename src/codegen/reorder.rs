use super::{ArgumentAndDeclIndex, Codegen, Error, StackValue, Type};


/// Move the arguments that were pushed out of declared order into their declared order.
///
/// Every argument must have already been evaluated onto the stack, in the order given by
/// `actual`. The longest prefix already in place is left untouched. The rest is popped
/// into temporaries, last pushed first, and pushed back sorted by declared index.
/// Temporaries are released before returning.
pub fn reorder_arguments_if_needed<A, C>(
	actual: &[ArgumentAndDeclIndex<A>],
	param_types: &[Type],
	codegen: &mut C,
) -> Result<(), Error>
where
	C: Codegen + ?Sized,
{
	let start = match actual
		.iter()
		.enumerate()
		.position(|(ix, arg)| arg.decl_index != ix)
	{
		Some(start) => start,
		None => return Ok(()),
	};

	tracing::trace!(from = start, count = actual.len() - start, "reordering arguments");

	let mark = codegen.frame().mark();
	let result = spill_and_reload(&actual[start..], param_types, codegen);
	let dropped = codegen.frame().drop_to(mark);

	result?;
	dropped
}


/// Pop the given arguments into temporaries and push them back in declared order.
fn spill_and_reload<A, C>(
	spilled: &[ArgumentAndDeclIndex<A>],
	param_types: &[Type],
	codegen: &mut C,
) -> Result<(), Error>
where
	C: Codegen + ?Sized,
{
	let param_type = |decl_index: usize| param_types
		.get(decl_index)
		.cloned()
		.ok_or_else(|| Error::invalid_argument_index(decl_index, param_types.len()));

	let mut temps = Vec::with_capacity(spilled.len());

	for arg in spilled.iter().rev() {
		let ty = param_type(arg.decl_index)?;
		let slot = codegen.frame().enter_temp(ty.clone());
		let temp = StackValue::local(slot, ty.clone());

		temp.store(StackValue::on_stack(ty), codegen.sink())?;

		temps.push((arg.decl_index, temp));
	}

	temps.sort_by_key(|(decl_index, _)| *decl_index);

	for (decl_index, temp) in temps {
		temp.put(&param_type(decl_index)?, codegen.sink())?;
	}

	Ok(())
}
