//! Virtual Machine implementation

use crate::builtins;
use crate::bytecode::Function;
use crate::bytecode_debug::{disassemble_function, disassemble_instruction};
use crate::compiler::compile_with;
use crate::error::{InterpretResult, RuntimeError, TulipError, VmError};
use crate::opcode::{instruction::*, OpCode};
use crate::value::{Closure, FieldMap, Interner, Module, Native, Upvalue, UpvalueRef, Value};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, trace};

// Module structure
mod config;
mod execution;
mod frame;
mod globals;
mod ops;
mod result;

// Re-export public types
pub use config::{VmConfig, DEFAULT_MAX_CALL_DEPTH};
pub use frame::CallFrame;
pub use globals::{GlobalVar, Globals};

// Internal imports
use result::ExecutionResult;

/// Frames kept at each end of a runtime error's stack trace
const TRACE_EDGE_FRAMES: usize = 10;

/// Virtual Machine
///
/// An explicit owned interpreter context. Values are reference counted with
/// `Rc`, so a `Vm` stays on the thread that created it; run one instance per
/// thread to execute scripts in parallel.
pub struct Vm {
    /// Operand stack; locals of every active frame live here too
    pub(crate) stack: Vec<Value>,

    /// Call stack
    pub(crate) frames: Vec<CallFrame>,

    /// Global variables
    pub(crate) globals: Globals,

    /// Upvalues still aliasing a live stack slot
    pub(crate) open_upvalues: Vec<UpvalueRef>,

    /// String table shared with the compiler
    pub(crate) interner: Interner,

    /// Value of the most recent script-level expression statement
    last_value: Value,

    config: VmConfig,

    /// Sink for `print` and friends
    output: Box<dyn Write>,

    /// Sink for diagnostics
    error_output: Box<dyn Write>,

    initialized: bool,

    started: Instant,
}

impl Vm {
    /// Create an uninitialized VM with the default configuration
    pub fn new() -> Self {
        Self::with_config(VmConfig::default())
    }

    pub fn with_config(config: VmConfig) -> Self {
        Self {
            stack: Vec::with_capacity(256),
            frames: Vec::with_capacity(64),
            globals: Globals::new(),
            open_upvalues: Vec::new(),
            interner: Interner::new(),
            last_value: Value::Null,
            config,
            output: Box::new(io::stdout()),
            error_output: Box::new(io::stderr()),
            initialized: false,
            started: Instant::now(),
        }
    }

    pub fn config(&self) -> &VmConfig {
        &self.config
    }

    // ===== Lifecycle =====

    /// Install the builtin library and the `args` global
    pub fn init<S: AsRef<str>>(&mut self, args: &[S]) {
        self.reset_state();
        self.started = Instant::now();

        builtins::install(self);

        let args: Vec<Value> = args
            .iter()
            .map(|arg| self.interner.string(arg.as_ref()))
            .collect();
        let name = self.interner.intern("args");
        self.globals.insert(name, Value::array(args), false);

        self.initialized = true;
        debug!(globals = self.globals.len(), "vm initialized");
    }

    /// Release every object the VM holds. Reference cycles between
    /// closures, globals and containers are broken here.
    pub fn free(&mut self) {
        self.reset_state();
        self.initialized = false;
        debug!("vm freed");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn reset_state(&mut self) {
        self.reset_stacks();
        self.globals.clear();
        self.interner.clear();
        self.last_value = Value::Null;
    }

    fn reset_stacks(&mut self) {
        self.stack.clear();
        self.frames.clear();
        self.open_upvalues.clear();
    }

    // ===== Embedding surface =====

    /// Redirect script output (`print`, `println`, `input` prompts)
    pub fn set_output(&mut self, writer: impl Write + 'static) {
        self.output = Box::new(writer);
    }

    /// Redirect compile and runtime diagnostics
    pub fn set_error_output(&mut self, writer: impl Write + 'static) {
        self.error_output = Box::new(writer);
    }

    /// Value of the last script-level expression statement of the last run
    pub fn last_value(&self) -> &Value {
        &self.last_value
    }

    /// Interned string value
    pub fn string(&mut self, text: &str) -> Value {
        self.interner.string(text)
    }

    /// Interned name, e.g. for module members
    pub fn intern(&mut self, text: &str) -> Rc<str> {
        self.interner.intern(text)
    }

    pub fn get_global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }

    /// Build a native function value without binding it
    pub fn native<F>(&mut self, name: &str, arity: i8, function: F) -> Value
    where
        F: Fn(&mut Vm, &[Value]) -> Result<Value, VmError> + 'static,
    {
        Value::Native(Rc::new(Native {
            name: self.interner.intern(name),
            arity,
            function: Rc::new(function),
        }))
    }

    /// Bind a host function as a mutable global. `arity` is the exact
    /// argument count, or -1 for variadic.
    pub fn register_native<F>(&mut self, name: &str, arity: i8, function: F)
    where
        F: Fn(&mut Vm, &[Value]) -> Result<Value, VmError> + 'static,
    {
        let value = self.native(name, arity, function);
        let name = self.interner.intern(name);
        self.globals.insert(name, value, false);
    }

    /// Bind a module global whose members are read with `name.member`
    pub fn define_module(&mut self, name: &str, members: FieldMap) {
        let name = self.interner.intern(name);
        let module = Value::Module(Rc::new(Module {
            name: name.clone(),
            members,
        }));
        self.globals.insert(name, module, false);
    }

    // ===== Running code =====

    /// Compile and run a unit, reporting diagnostics to the error sink
    pub fn interpret(&mut self, source: &str, unit_name: &str) -> InterpretResult {
        match self.run(source, unit_name) {
            Ok(_) => InterpretResult::Ok,
            Err(err) => {
                // Diagnostics are best effort; the result code carries the outcome
                let _ = writeln!(self.error_output, "{}", err);
                let _ = self.error_output.flush();
                err.result_code()
            }
        }
    }

    /// Compile and run a unit, returning its last value
    pub fn run(&mut self, source: &str, unit_name: &str) -> Result<Value, TulipError> {
        if !self.initialized {
            return Err(RuntimeError {
                error: VmError::NotInitialized,
                line: 0,
                trace: Vec::new(),
            }
            .into());
        }

        self.last_value = Value::Null;
        debug!(unit = unit_name, "compiling");
        let function = compile_with(source, &mut self.interner)?;

        if self.config.print_code {
            debug!("\n{}", disassemble_function(&function, unit_name));
        }

        debug!(unit = unit_name, "running");
        self.execute(function)?;
        Ok(self.last_value.clone())
    }

    /// Run a compiled top-level function to completion
    pub fn execute(&mut self, function: Rc<Function>) -> Result<Value, RuntimeError> {
        let closure = Rc::new(Closure::new(function, Vec::new()));
        self.stack.push(Value::Closure(closure.clone()));

        let outcome = self.call_closure(closure, 0).and_then(|()| self.run_loop());
        outcome.map_err(|error| {
            let err = self.runtime_error(error);
            debug!(line = err.line, "runtime error: {}", err.error);
            self.reset_stacks();
            err
        })
    }

    /// Main execution loop
    fn run_loop(&mut self) -> Result<Value, VmError> {
        loop {
            let instruction = self
                .current_frame_mut()?
                .fetch()
                .ok_or_else(|| VmError::Runtime("Instruction pointer out of range.".to_string()))?;

            let opcode_byte = decode_opcode(instruction);
            let opcode = OpCode::from_u8(opcode_byte).ok_or(VmError::InvalidOpcode(opcode_byte))?;

            if self.config.trace_execution {
                self.trace_instruction();
            }

            match self.execute_instruction(opcode, instruction)? {
                ExecutionResult::Continue => {}
                ExecutionResult::Return(value) => {
                    let frame = self.frames.pop().ok_or(VmError::StackUnderflow)?;
                    self.close_upvalues(frame.base);
                    self.stack.truncate(frame.base);
                    if self.frames.is_empty() {
                        return Ok(value);
                    }
                    self.stack.push(value);
                }
            }
        }
    }

    /// Execute a single instruction
    fn execute_instruction(
        &mut self,
        opcode: OpCode,
        instruction: u32,
    ) -> Result<ExecutionResult, VmError> {
        match opcode {
            // Constants, stack and variables
            OpCode::Constant
            | OpCode::Null
            | OpCode::True
            | OpCode::False
            | OpCode::Pop
            | OpCode::PopResult
            | OpCode::DefineGlobal
            | OpCode::GetGlobal
            | OpCode::SetGlobal
            | OpCode::GetLocal
            | OpCode::SetLocal
            | OpCode::GetUpvalue
            | OpCode::SetUpvalue
            | OpCode::AssignConst => self.execute_variables(opcode, instruction),

            // Fused increments
            OpCode::IncLocal
            | OpCode::IncUpvalue
            | OpCode::IncGlobal
            | OpCode::IncField
            | OpCode::IncIndex => self.execute_increment(opcode, instruction),

            // Arithmetic operations
            OpCode::Add
            | OpCode::Subtract
            | OpCode::Multiply
            | OpCode::Divide
            | OpCode::Power
            | OpCode::IntDivide
            | OpCode::Percent
            | OpCode::Negate
            | OpCode::Not => self.execute_arithmetic(opcode),

            // Comparison operations
            OpCode::Equal
            | OpCode::NotEqual
            | OpCode::Greater
            | OpCode::GreaterEqual
            | OpCode::Less
            | OpCode::LessEqual => self.execute_comparison(opcode),

            // Control flow
            OpCode::Jump | OpCode::JumpIfFalse | OpCode::Loop | OpCode::Return => {
                self.execute_control(opcode, instruction)
            }

            // Functions and closures
            OpCode::Call | OpCode::Closure | OpCode::CloseUpvalue => {
                self.execute_functions(opcode, instruction)
            }

            // Arrays, maps, indexing
            OpCode::Array | OpCode::Map | OpCode::GetIndex | OpCode::SetIndex | OpCode::Slice => {
                self.execute_collections(opcode, instruction)
            }

            // Structs and fields
            OpCode::StructType | OpCode::Instance | OpCode::GetField | OpCode::SetField => {
                self.execute_structs(opcode, instruction)
            }

            // Iteration
            OpCode::IterInit | OpCode::IterHasNext | OpCode::IterNext => {
                self.execute_iterators(opcode, instruction)
            }
        }
    }

    fn trace_instruction(&self) {
        let Some(frame) = self.frames.last() else {
            return;
        };
        let stack: Vec<String> = self.stack.iter().map(|v| format!("[{}]", v)).collect();
        let offset = frame.ip.saturating_sub(1);
        trace!(
            depth = self.frames.len(),
            stack = %stack.join(""),
            "{}",
            disassemble_instruction(&frame.closure.function.chunk, offset)
        );
    }

    // ===== Helper methods =====

    #[inline]
    pub(crate) fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> Result<Value, VmError> {
        self.stack.pop().ok_or(VmError::StackUnderflow)
    }

    /// Value `distance` slots below the top
    pub(crate) fn peek(&self, distance: usize) -> Result<&Value, VmError> {
        self.stack
            .len()
            .checked_sub(distance + 1)
            .and_then(|index| self.stack.get(index))
            .ok_or(VmError::StackUnderflow)
    }

    /// Get current call frame
    pub(crate) fn current_frame(&self) -> Result<&CallFrame, VmError> {
        self.frames.last().ok_or(VmError::StackUnderflow)
    }

    /// Get current call frame (mutable)
    pub(crate) fn current_frame_mut(&mut self) -> Result<&mut CallFrame, VmError> {
        self.frames.last_mut().ok_or(VmError::StackUnderflow)
    }

    /// Absolute stack index of local `slot` in the current frame
    pub(crate) fn local_slot(&self, slot: usize) -> Result<usize, VmError> {
        Ok(self.current_frame()?.base + slot)
    }

    /// Get constant from current frame's function
    pub(crate) fn read_constant(&self, index: usize) -> Result<Value, VmError> {
        self.current_frame()?
            .closure
            .function
            .chunk
            .constants
            .get(index)
            .cloned()
            .ok_or_else(|| VmError::Runtime(format!("Invalid constant index: {}", index)))
    }

    /// Get a name constant from current frame's function
    pub(crate) fn read_string(&self, index: usize) -> Result<Rc<str>, VmError> {
        match self.read_constant(index)? {
            Value::String(s) => Ok(s),
            other => Err(VmError::Runtime(format!(
                "Constant {} is a {}, expected a name",
                index,
                other.type_name()
            ))),
        }
    }

    /// Write script output
    pub(crate) fn write_output(&mut self, text: &str) -> Result<(), VmError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|e| VmError::Runtime(format!("Failed to write output: {}", e)))
    }

    /// Seconds since the VM was initialized
    pub(crate) fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    // ===== Calls =====

    /// Call `callee`, which sits below its `argc` arguments on the stack
    pub(crate) fn call_value(&mut self, callee: Value, argc: usize) -> Result<(), VmError> {
        match callee {
            Value::Closure(closure) => self.call_closure(closure, argc),
            Value::Native(native) => self.call_native(&native, argc),
            other => Err(VmError::NotCallable(other.type_name().to_string())),
        }
    }

    fn call_closure(&mut self, closure: Rc<Closure>, argc: usize) -> Result<(), VmError> {
        let arity = closure.function.arity as usize;
        if argc != arity {
            return Err(VmError::ArityMismatch {
                name: closure.function.display_name().to_string(),
                expected: arity,
                got: argc,
            });
        }

        if self.frames.len() >= self.config.max_call_depth {
            return Err(VmError::StackOverflow);
        }

        let base = self
            .stack
            .len()
            .checked_sub(argc + 1)
            .ok_or(VmError::StackUnderflow)?;
        self.frames.push(CallFrame::new(closure, base));
        Ok(())
    }

    fn call_native(&mut self, native: &Rc<Native>, argc: usize) -> Result<(), VmError> {
        if native.arity >= 0 && native.arity as usize != argc {
            return Err(VmError::ArityMismatch {
                name: native.name.to_string(),
                expected: native.arity as usize,
                got: argc,
            });
        }

        let start = self
            .stack
            .len()
            .checked_sub(argc)
            .ok_or(VmError::StackUnderflow)?;
        let args: Vec<Value> = self.stack[start..].to_vec();
        let result = (native.function)(self, &args)?;

        self.stack.truncate(start.saturating_sub(1));
        self.push(result);
        Ok(())
    }

    // ===== Upvalues =====

    /// Upvalue cell for stack slot `slot`, shared with any closure that
    /// already captured it
    pub(crate) fn capture_upvalue(&mut self, slot: usize) -> UpvalueRef {
        let existing = self
            .open_upvalues
            .iter()
            .find(|uv| matches!(*uv.borrow(), Upvalue::Open(s) if s == slot));
        if let Some(upvalue) = existing {
            return upvalue.clone();
        }

        let upvalue = Rc::new(RefCell::new(Upvalue::Open(slot)));
        self.open_upvalues.push(upvalue.clone());
        upvalue
    }

    /// Close every open upvalue at or above stack slot `from`
    pub(crate) fn close_upvalues(&mut self, from: usize) {
        let stack = &self.stack;
        self.open_upvalues.retain(|upvalue| {
            let slot = match *upvalue.borrow() {
                Upvalue::Open(slot) => slot,
                Upvalue::Closed(_) => return false,
            };
            if slot < from {
                return true;
            }
            let value = stack.get(slot).cloned().unwrap_or(Value::Null);
            *upvalue.borrow_mut() = Upvalue::Closed(value);
            false
        });
    }

    pub(crate) fn read_upvalue(&self, upvalue: &UpvalueRef) -> Value {
        match &*upvalue.borrow() {
            Upvalue::Open(slot) => self.stack.get(*slot).cloned().unwrap_or(Value::Null),
            Upvalue::Closed(value) => value.clone(),
        }
    }

    pub(crate) fn write_upvalue(&mut self, upvalue: &UpvalueRef, value: Value) {
        match &mut *upvalue.borrow_mut() {
            Upvalue::Open(slot) => {
                if let Some(target) = self.stack.get_mut(*slot) {
                    *target = value;
                }
            }
            Upvalue::Closed(closed) => *closed = value,
        }
    }

    /// Upvalue cell `index` of the running closure
    pub(crate) fn upvalue_cell(&self, index: usize) -> Result<UpvalueRef, VmError> {
        self.current_frame()?
            .closure
            .upvalues
            .get(index)
            .cloned()
            .ok_or_else(|| VmError::Runtime(format!("Invalid upvalue index: {}", index)))
    }

    // ===== Errors =====

    /// Attach the faulting line and a stack trace to a runtime fault
    fn runtime_error(&self, error: VmError) -> RuntimeError {
        let describe = |depth: usize, frame: &CallFrame| {
            let function = &frame.closure.function;
            let line = frame.current_line();
            match (&function.name, depth) {
                (_, 0) => format!("[line {}] in script", line),
                (Some(name), _) => format!("[line {}] in {}()", line, name),
                (None, _) => format!("[line {}] in <anonymous>()", line),
            }
        };

        // Innermost and outermost frames survive; the middle collapses
        let count = self.frames.len();
        let mut trace = Vec::with_capacity(count.min(2 * TRACE_EDGE_FRAMES + 1));
        for (depth, frame) in self.frames.iter().enumerate().rev() {
            let from_top = count - 1 - depth;
            if count > 2 * TRACE_EDGE_FRAMES && from_top == TRACE_EDGE_FRAMES {
                trace.push(format!(
                    "... {} more frames",
                    count - 2 * TRACE_EDGE_FRAMES
                ));
            }
            if from_top < TRACE_EDGE_FRAMES || depth < TRACE_EDGE_FRAMES {
                trace.push(describe(depth, frame));
            }
        }

        let line = self.frames.last().map(CallFrame::current_line).unwrap_or(0);
        RuntimeError { error, line, trace }
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
