//! Helper functions and common imports for integration tests.

use crate::error::TulipError;
use crate::value::Value;
use crate::vm::{Vm, VmConfig};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// In-memory sink that stays readable after being handed to the VM
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Initialized VM whose output is captured
pub fn new_vm_with(config: VmConfig) -> (Vm, SharedBuffer) {
    let mut vm = Vm::with_config(config);
    vm.init(&["tulip"]);
    let output = SharedBuffer::default();
    vm.set_output(output.clone());
    (vm, output)
}

pub fn new_vm() -> (Vm, SharedBuffer) {
    new_vm_with(VmConfig::default())
}

/// Run source and return its last value
pub fn execute(source: &str) -> Result<Value, String> {
    let (mut vm, _) = new_vm();
    vm.run(source, "<test>").map_err(|e| e.to_string())
}

/// Run source and return everything it printed
pub fn output_of(source: &str) -> String {
    let (mut vm, output) = new_vm();
    if let Err(err) = vm.run(source, "<test>") {
        panic!("script failed: {}", err);
    }
    output.contents()
}

/// Run source that must fail
pub fn run_error(source: &str) -> TulipError {
    let (mut vm, _) = new_vm();
    match vm.run(source, "<test>") {
        Ok(value) => panic!("expected an error, got {}", value),
        Err(err) => err,
    }
}
