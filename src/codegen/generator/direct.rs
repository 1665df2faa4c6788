use super::{
	gen_argument,
	mark_call_line,
	put_receiver,
	Callable,
	Codegen,
	Error,
	ResolvedCall,
};
use crate::codegen::reorder_arguments_if_needed;


/// Ordinary calls: arguments in source order, reordered if needed, then the invocation.
#[derive(Debug, Default)]
pub struct DirectCall;


impl DirectCall {
	pub fn gen_call<C>(
		self,
		callable: &Callable,
		call: &ResolvedCall<C::Expr>,
		codegen: &mut C,
	) -> Result<(), Error>
	where
		C: Codegen + ?Sized,
	{
		call.validate(callable.params.len())?;

		put_receiver(callable, call, codegen)?;

		let actual = call.actual_order();

		for arg in actual.iter() {
			gen_argument(arg.argument, &callable.params[arg.decl_index], arg.decl_index, codegen)?;
		}

		reorder_arguments_if_needed(&actual, &callable.params, codegen)?;

		mark_call_line(call.pos, codegen);
		callable.gen_invoke_instruction(codegen.sink());

		Ok(())
	}
}
