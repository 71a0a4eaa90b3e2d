//! OpCode definitions for the Tulip VM
//!
//! Instructions are encoded as 32-bit values with two formats:
//!
//! Format Ax: [8-bit opcode][24-bit Ax]
//! Format AB: [8-bit opcode][8-bit A][16-bit B]
//!
//! The VM is a stack machine: operands come from and results go to the
//! operand stack, and the instruction word only carries immediates
//! (constant indices, local slots, jump offsets, counts and flags).

use std::fmt;

/// Virtual machine instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    // ===== Constants & Literals =====
    /// Push constant: push K[Ax]
    Constant = 0,
    /// Push null
    Null = 1,
    /// Push true
    True = 2,
    /// Push false
    False = 3,
    /// Discard the top of the stack
    Pop = 4,
    /// Discard the top of the stack, recording it as the last value
    PopResult = 5,

    // ===== Variables =====
    /// Define global K[B] from the popped value; A = 1 marks it const
    DefineGlobal = 10,
    /// Push globals[K[Ax]]
    GetGlobal = 11,
    /// globals[K[Ax]] = peek
    SetGlobal = 12,
    /// Push stack[base + Ax]
    GetLocal = 13,
    /// stack[base + Ax] = peek
    SetLocal = 14,
    /// Push upvalues[Ax]
    GetUpvalue = 15,
    /// upvalues[Ax] = peek
    SetUpvalue = 16,
    /// Fault: assignment to the const binding named K[Ax]
    AssignConst = 17,

    // ===== Fused increments (A = mode: bit 0 decrement, bit 1 postfix) =====
    /// Increment stack[base + B]
    IncLocal = 20,
    /// Increment upvalues[B]
    IncUpvalue = 21,
    /// Increment globals[K[B]]
    IncGlobal = 22,
    /// Increment field K[B] of the popped object
    IncField = 23,
    /// Increment element of popped object at popped index; Ax = mode
    IncIndex = 24,

    // ===== Access =====
    /// Replace object with its field K[Ax]
    GetField = 30,
    /// Set field K[Ax] of object to value: [obj, value] -> [value]
    SetField = 31,
    /// [obj, index] -> [element]
    GetIndex = 32,
    /// [obj, index, value] -> [value]
    SetIndex = 33,
    /// [obj, lo, hi] -> [slice]; null bounds are open
    Slice = 34,

    // ===== Comparison =====
    Equal = 40,
    NotEqual = 41,
    Greater = 42,
    GreaterEqual = 43,
    Less = 44,
    LessEqual = 45,

    // ===== Arithmetic =====
    Add = 50,
    Subtract = 51,
    Multiply = 52,
    Divide = 53,
    /// `**`
    Power = 54,
    /// `/_`: floor of the quotient
    IntDivide = 55,
    /// `%%`: a percent of b
    Percent = 56,
    Negate = 57,
    Not = 58,

    // ===== Jumps & Branches =====
    /// ip += Ax
    Jump = 60,
    /// if peek is falsy then ip += Ax (does not pop)
    JumpIfFalse = 61,
    /// ip -= Ax
    Loop = 62,

    // ===== Functions =====
    /// Call the value below Ax arguments
    Call = 70,
    /// Push closure over the function prototype K[Ax]
    Closure = 71,
    /// Close the upvalue for the top slot, then pop it
    CloseUpvalue = 72,
    /// Return the popped value from the current frame
    Return = 73,

    // ===== Collections =====
    /// Build array from the top Ax values
    Array = 80,
    /// Build map from the top Ax key/value pairs
    Map = 81,

    // ===== Structs =====
    /// Build struct type K[B] from A (name, default) pairs
    StructType = 90,
    /// Instantiate: [type, (name, value) * A] -> [instance]; B = 1 is forced
    Instance = 91,

    // ===== Iteration =====
    /// Turn the popped iterable into an array iterator
    IterInit = 100,
    /// Push whether the iterator in stack[base + Ax] has more elements
    IterHasNext = 101,
    /// Advance the iterator in stack[base + Ax] and push its element
    IterNext = 102,
}

impl OpCode {
    pub fn from_u8(byte: u8) -> Option<Self> {
        let op = match byte {
            0 => OpCode::Constant,
            1 => OpCode::Null,
            2 => OpCode::True,
            3 => OpCode::False,
            4 => OpCode::Pop,
            5 => OpCode::PopResult,
            10 => OpCode::DefineGlobal,
            11 => OpCode::GetGlobal,
            12 => OpCode::SetGlobal,
            13 => OpCode::GetLocal,
            14 => OpCode::SetLocal,
            15 => OpCode::GetUpvalue,
            16 => OpCode::SetUpvalue,
            17 => OpCode::AssignConst,
            20 => OpCode::IncLocal,
            21 => OpCode::IncUpvalue,
            22 => OpCode::IncGlobal,
            23 => OpCode::IncField,
            24 => OpCode::IncIndex,
            30 => OpCode::GetField,
            31 => OpCode::SetField,
            32 => OpCode::GetIndex,
            33 => OpCode::SetIndex,
            34 => OpCode::Slice,
            40 => OpCode::Equal,
            41 => OpCode::NotEqual,
            42 => OpCode::Greater,
            43 => OpCode::GreaterEqual,
            44 => OpCode::Less,
            45 => OpCode::LessEqual,
            50 => OpCode::Add,
            51 => OpCode::Subtract,
            52 => OpCode::Multiply,
            53 => OpCode::Divide,
            54 => OpCode::Power,
            55 => OpCode::IntDivide,
            56 => OpCode::Percent,
            57 => OpCode::Negate,
            58 => OpCode::Not,
            60 => OpCode::Jump,
            61 => OpCode::JumpIfFalse,
            62 => OpCode::Loop,
            70 => OpCode::Call,
            71 => OpCode::Closure,
            72 => OpCode::CloseUpvalue,
            73 => OpCode::Return,
            80 => OpCode::Array,
            81 => OpCode::Map,
            90 => OpCode::StructType,
            91 => OpCode::Instance,
            100 => OpCode::IterInit,
            101 => OpCode::IterHasNext,
            102 => OpCode::IterNext,
            _ => return None,
        };
        Some(op)
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether the instruction uses the AB operand format
    pub fn is_ab_format(self) -> bool {
        matches!(
            self,
            OpCode::DefineGlobal
                | OpCode::IncLocal
                | OpCode::IncUpvalue
                | OpCode::IncGlobal
                | OpCode::IncField
                | OpCode::StructType
                | OpCode::Instance
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            OpCode::Constant => "CONSTANT",
            OpCode::Null => "NULL",
            OpCode::True => "TRUE",
            OpCode::False => "FALSE",
            OpCode::Pop => "POP",
            OpCode::PopResult => "POP_RESULT",
            OpCode::DefineGlobal => "DEFINE_GLOBAL",
            OpCode::GetGlobal => "GET_GLOBAL",
            OpCode::SetGlobal => "SET_GLOBAL",
            OpCode::GetLocal => "GET_LOCAL",
            OpCode::SetLocal => "SET_LOCAL",
            OpCode::GetUpvalue => "GET_UPVALUE",
            OpCode::SetUpvalue => "SET_UPVALUE",
            OpCode::AssignConst => "ASSIGN_CONST",
            OpCode::IncLocal => "INC_LOCAL",
            OpCode::IncUpvalue => "INC_UPVALUE",
            OpCode::IncGlobal => "INC_GLOBAL",
            OpCode::IncField => "INC_FIELD",
            OpCode::IncIndex => "INC_INDEX",
            OpCode::GetField => "GET_FIELD",
            OpCode::SetField => "SET_FIELD",
            OpCode::GetIndex => "GET_INDEX",
            OpCode::SetIndex => "SET_INDEX",
            OpCode::Slice => "SLICE",
            OpCode::Equal => "EQUAL",
            OpCode::NotEqual => "NOT_EQUAL",
            OpCode::Greater => "GREATER",
            OpCode::GreaterEqual => "GREATER_EQUAL",
            OpCode::Less => "LESS",
            OpCode::LessEqual => "LESS_EQUAL",
            OpCode::Add => "ADD",
            OpCode::Subtract => "SUBTRACT",
            OpCode::Multiply => "MULTIPLY",
            OpCode::Divide => "DIVIDE",
            OpCode::Power => "POWER",
            OpCode::IntDivide => "INT_DIVIDE",
            OpCode::Percent => "PERCENT",
            OpCode::Negate => "NEGATE",
            OpCode::Not => "NOT",
            OpCode::Jump => "JUMP",
            OpCode::JumpIfFalse => "JUMP_IF_FALSE",
            OpCode::Loop => "LOOP",
            OpCode::Call => "CALL",
            OpCode::Closure => "CLOSURE",
            OpCode::CloseUpvalue => "CLOSE_UPVALUE",
            OpCode::Return => "RETURN",
            OpCode::Array => "ARRAY",
            OpCode::Map => "MAP",
            OpCode::StructType => "STRUCT_TYPE",
            OpCode::Instance => "INSTANCE",
            OpCode::IterInit => "ITER_INIT",
            OpCode::IterHasNext => "ITER_HAS_NEXT",
            OpCode::IterNext => "ITER_NEXT",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Increment mode flags carried by the fused increment instructions
pub mod inc_mode {
    pub const DECREMENT: u8 = 0b01;
    pub const POSTFIX: u8 = 0b10;
}

/// Instruction encoding/decoding utilities
pub mod instruction {
    /// Largest operand the Ax format can carry
    pub const MAX_AX: u32 = 0x00FF_FFFF;

    /// Encode instruction in Ax format
    #[inline]
    pub fn encode_ax(opcode: u8, ax: u32) -> u32 {
        ((opcode as u32) << 24) | (ax & MAX_AX)
    }

    /// Encode instruction in AB format
    #[inline]
    pub fn encode_ab(opcode: u8, a: u8, b: u16) -> u32 {
        ((opcode as u32) << 24) | ((a as u32) << 16) | (b as u32)
    }

    /// Decode instruction opcode
    #[inline]
    pub fn decode_opcode(instruction: u32) -> u8 {
        (instruction >> 24) as u8
    }

    /// Decode Ax operand (24-bit)
    #[inline]
    pub fn decode_ax(instruction: u32) -> u32 {
        instruction & MAX_AX
    }

    /// Decode A operand of the AB format
    #[inline]
    pub fn decode_a(instruction: u32) -> u8 {
        ((instruction >> 16) & 0xFF) as u8
    }

    /// Decode B operand of the AB format
    #[inline]
    pub fn decode_b(instruction: u32) -> u16 {
        (instruction & 0xFFFF) as u16
    }
}
