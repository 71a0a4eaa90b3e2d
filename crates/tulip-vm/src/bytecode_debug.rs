//! Bytecode debugging utilities

use crate::bytecode::{Chunk, Function};
use crate::opcode::{inc_mode, instruction::*, OpCode};
use crate::value::Value;

/// Detailed disassembly of a function and, recursively, every function
/// in its constant pool
pub fn disassemble_function(function: &Function, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("========== {} ==========\n", name));
    out.push_str(&format!(
        "arity: {}  upvalues: {}  constants: {}\n",
        function.arity,
        function.upvalue_count(),
        function.chunk.constants.len()
    ));

    for (i, upvalue) in function.upvalues.iter().enumerate() {
        let origin = if upvalue.is_local { "local" } else { "upvalue" };
        out.push_str(&format!(
            "  upvalue[{}] {} {}{}\n",
            i,
            origin,
            upvalue.index,
            if upvalue.is_const { " const" } else { "" }
        ));
    }

    for offset in 0..function.chunk.len() {
        out.push_str(&disassemble_instruction(&function.chunk, offset));
        out.push('\n');
    }

    // Nested functions
    for constant in &function.chunk.constants {
        if let Value::Function(nested) = constant {
            out.push('\n');
            out.push_str(&disassemble_function(nested, nested.display_name()));
        }
    }

    out
}

/// One line of disassembly: offset, line, opcode and decoded operands
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> String {
    let Some(&instruction) = chunk.code.get(offset) else {
        return format!("{:04}  <out of range>", offset);
    };

    let line = chunk.line_at(offset);
    let line_column = if offset > 0 && chunk.line_at(offset - 1) == line {
        "   |".to_string()
    } else {
        format!("{:4}", line)
    };

    let opcode_byte = decode_opcode(instruction);
    let Some(opcode) = OpCode::from_u8(opcode_byte) else {
        return format!(
            "{:04} {} UNKNOWN opcode={} (raw: 0x{:08x})",
            offset, line_column, opcode_byte, instruction
        );
    };

    let operands = operands(chunk, offset, opcode, instruction);
    format!("{:04} {} {:<16}{}", offset, line_column, opcode.name(), operands)
}

fn operands(chunk: &Chunk, offset: usize, opcode: OpCode, instruction: u32) -> String {
    let ax = decode_ax(instruction) as usize;
    let a = decode_a(instruction);
    let b = decode_b(instruction) as usize;

    match opcode {
        OpCode::Constant
        | OpCode::GetGlobal
        | OpCode::SetGlobal
        | OpCode::AssignConst
        | OpCode::GetField
        | OpCode::SetField
        | OpCode::Closure => format!("{:4} '{}'", ax, constant(chunk, ax)),

        OpCode::DefineGlobal => format!(
            "{:4} '{}'{}",
            b,
            constant(chunk, b),
            if a == 1 { " const" } else { "" }
        ),

        OpCode::GetLocal
        | OpCode::SetLocal
        | OpCode::GetUpvalue
        | OpCode::SetUpvalue
        | OpCode::Call
        | OpCode::Array
        | OpCode::Map
        | OpCode::IterHasNext
        | OpCode::IterNext => format!("{:4}", ax),

        OpCode::IncLocal | OpCode::IncUpvalue => format!("{:4} {}", b, increment_mode(a)),
        OpCode::IncGlobal | OpCode::IncField => {
            format!("{:4} '{}' {}", b, constant(chunk, b), increment_mode(a))
        }
        OpCode::IncIndex => increment_mode(ax as u8).to_string(),

        OpCode::Jump | OpCode::JumpIfFalse => {
            format!("{:4} -> {}", ax, offset + 1 + ax)
        }
        OpCode::Loop => format!("{:4} -> {}", ax, (offset + 1).saturating_sub(ax)),

        OpCode::StructType => format!("{:4} '{}'", a, constant(chunk, b)),
        OpCode::Instance => format!("{:4}{}", a, if b == 1 { " forced" } else { "" }),

        _ => String::new(),
    }
}

fn constant(chunk: &Chunk, index: usize) -> String {
    chunk
        .constants
        .get(index)
        .map(|v| v.to_string())
        .unwrap_or_else(|| "???".to_string())
}

fn increment_mode(mode: u8) -> &'static str {
    match (mode & inc_mode::DECREMENT != 0, mode & inc_mode::POSTFIX != 0) {
        (false, false) => "++x",
        (false, true) => "x++",
        (true, false) => "--x",
        (true, true) => "x--",
    }
}
