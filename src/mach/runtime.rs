use super::{Config, Defs, Function, Input, Io, Operation, Output, Program, Rnd, Stack, Val, Var};
use crate::error;
use crate::lang::ast::{Expression, PrintItem, Statement, Variable};
use crate::lang::token::Builtin;
use crate::lang::{Error, ErrorCode, Ident, LineNumber};
use std::collections::VecDeque;
use std::convert::TryFrom;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

const ZONE_WIDTH: usize = 14;

/// User functions recurse on the host stack, so nesting is capped
/// below the configured stack limit.
const MAX_FN_DEPTH: usize = 256;

/// What the driving loop does after a statement.
#[derive(Debug, PartialEq)]
enum Control {
    Continue,
    Jump(usize),
    End,
}

#[derive(Debug)]
struct ForLoop {
    var: Ident,
    limit: f32,
    step: f32,
    start: usize,
    single_line: bool,
}

/// ## Execution engine
///
/// Owns every piece of state a running program touches. One
/// `Runtime` runs one program once.

pub struct Runtime<'a> {
    program: &'a Program,
    io: Io<'a>,
    vars: Var,
    defs: Defs,
    rnd: Rnd,
    gosubs: Stack<usize>,
    fors: Stack<ForLoop>,
    line: LineNumber,
    index: usize,
    depth: usize,
    depth_limit: usize,
}

impl<'a> Runtime<'a> {
    pub fn new(
        program: &'a Program,
        input: &'a mut dyn Input,
        output: &'a mut dyn Output,
        config: &Config,
    ) -> Runtime<'a> {
        let mut io = Io::new(input, output);
        io.set_data_strings(program.data());
        Runtime {
            program,
            io,
            vars: Var::new(),
            defs: Defs::new(),
            rnd: Rnd::new(config.seed),
            gosubs: Stack::new("GOSUB STACK OVERFLOW", config.stack_limit),
            fors: Stack::new("FOR STACK OVERFLOW", config.stack_limit),
            line: 0,
            index: 0,
            depth: 0,
            depth_limit: config.stack_limit.min(MAX_FN_DEPTH),
        }
    }

    /// Runs until END, STOP, or the last line. Errors carry the
    /// BASIC line number that was executing.
    pub fn run(&mut self) -> Result<()> {
        debug!(lines = self.program.len(), "run");
        let program = self.program;
        self.index = 0;
        while let Some(entry) = program.entry(self.index) {
            self.line = entry.label();
            trace!(line = self.line, "execute");
            match self.execute_line(entry.statements()) {
                Err(error) => return Err(error.in_line_number(self.line)),
                Ok(Control::End) => break,
                Ok(Control::Jump(index)) => {
                    trace!(from = self.line, to = index, "jump");
                    self.index = index;
                }
                Ok(Control::Continue) => self.index += 1,
            }
        }
        debug!(line = self.line, "run finished");
        Ok(())
    }

    fn execute_line(&mut self, statements: &[Statement]) -> Result<Control> {
        for statement in statements {
            match self.execute(statement)? {
                Control::Continue => continue,
                control => return Ok(control),
            }
        }
        Ok(Control::Continue)
    }

    fn execute(&mut self, statement: &Statement) -> Result<Control> {
        match statement {
            Statement::Data(..) | Statement::Rem(_) => Ok(Control::Continue),
            Statement::Def(_, name, params, body) => {
                self.defs.define(name, params, body);
                Ok(Control::Continue)
            }
            Statement::Dim(_, vars) => self.r#dim(vars),
            Statement::End(_) | Statement::Stop(_) => {
                debug!(line = self.line, "end");
                Ok(Control::End)
            }
            Statement::For(_, var, from, to, step) => self.r#for(var, from, to, step.as_ref()),
            Statement::Gosub(_, label) => self.r#gosub(*label),
            Statement::Goto(_, label) => self.r#goto(*label),
            Statement::If(_, predicate, then) => {
                if self.eval(predicate)?.is_true()? {
                    self.execute_line(then)
                } else {
                    Ok(Control::Continue)
                }
            }
            Statement::Input(_, prompt, vars) => self.r#input(prompt.as_deref(), vars),
            Statement::Let(_, var, expr) => {
                let val = self.eval(expr)?;
                self.store(var, val)?;
                Ok(Control::Continue)
            }
            Statement::Next(_, vars) => self.r#next(vars),
            Statement::OnGoto(_, index, labels) => match self.on_label(index, labels)? {
                Some(label) => self.r#goto(label),
                None => Ok(Control::Continue),
            },
            Statement::OnGosub(_, index, labels) => match self.on_label(index, labels)? {
                Some(label) => self.r#gosub(label),
                None => Ok(Control::Continue),
            },
            Statement::Print(_, items) => self.r#print(items),
            Statement::Randomize(_, seed) => self.r#randomize(seed.as_ref()),
            Statement::Read(_, vars) => self.r#read(vars),
            Statement::Restore(_, label) => self.r#restore(*label),
            Statement::Return(_) => match self.gosubs.pop() {
                Some(index) => Ok(Control::Jump(index + 1)),
                None => Err(error!(RuntimeError; "RETURN WITHOUT GOSUB")),
            },
        }
    }

    fn jump(&mut self, label: LineNumber, code: ErrorCode) -> Result<Control> {
        self.line = label;
        match self.program.index_of(label) {
            Some(index) => Ok(Control::Jump(index)),
            None => Err(Error::new(code).in_line_number(label)),
        }
    }

    fn r#goto(&mut self, label: LineNumber) -> Result<Control> {
        self.jump(label, ErrorCode::BadGotoTarget)
    }

    fn r#gosub(&mut self, label: LineNumber) -> Result<Control> {
        self.gosubs.push(self.index)?;
        self.jump(label, ErrorCode::BadGosubTarget)
    }

    fn on_label(&mut self, index: &Expression, labels: &[LineNumber]) -> Result<Option<LineNumber>> {
        let n = self.eval_number(index)?.trunc();
        if n >= 1.0 && n <= labels.len() as f32 {
            Ok(Some(labels[n as usize - 1]))
        } else {
            Ok(None)
        }
    }

    fn r#dim(&mut self, vars: &[Variable]) -> Result<Control> {
        for var in vars {
            if let Variable::Array(col, ident, bounds) = var {
                let bounds = self.eval_list(bounds)?;
                self.vars
                    .dimension_array(ident, bounds)
                    .map_err(|e| e.in_column(col))?;
            }
        }
        Ok(Control::Continue)
    }

    fn r#for(
        &mut self,
        var: &Ident,
        from: &Expression,
        to: &Expression,
        step: Option<&Expression>,
    ) -> Result<Control> {
        if self.loop_is_running(var) {
            return Ok(Control::Continue);
        }
        let start = self.eval(from)?;
        let limit = self.eval_number(to)?;
        let step = match step {
            Some(expr) => self.eval_number(expr)?,
            None => 1.0,
        };
        self.fors.push(ForLoop {
            var: var.clone(),
            limit,
            step,
            start: self.index,
            single_line: false,
        })?;
        self.vars.store(var, start)?;
        Ok(Control::Continue)
    }

    /// True when this FOR is being passed again by a single-line loop:
    /// either its own loop is single-line, or an inner single-line loop
    /// started on this same line is re-running it.
    fn loop_is_running(&self, var: &Ident) -> bool {
        if self.fors.iter().any(|f| f.single_line && f.var == *var) {
            return true;
        }
        let mut inner_rerun = false;
        for f in self.fors.iter().rev() {
            if f.var == *var {
                return inner_rerun && f.start == self.index;
            }
            if f.single_line && f.start == self.index {
                inner_rerun = true;
            }
        }
        false
    }

    fn r#next(&mut self, vars: &[Ident]) -> Result<Control> {
        if vars.is_empty() {
            return self.next_loop(None);
        }
        for var in vars {
            match self.next_loop(Some(var))? {
                Control::Continue => continue,
                control => return Ok(control),
            }
        }
        Ok(Control::Continue)
    }

    /// Steps the innermost loop. Jumps back while the limit holds,
    /// otherwise pops the loop and continues on this line.
    fn next_loop(&mut self, var: Option<&Ident>) -> Result<Control> {
        let (ident, limit, step, start) = match self.fors.last() {
            Some(f) => (f.var.clone(), f.limit, f.step, f.start),
            None => return Err(error!(RuntimeError; "NEXT WITHOUT FOR")),
        };
        if let Some(var) = var {
            if *var != ident {
                return Err(error!(RuntimeError; "NEXT VARIABLE MISMATCH"));
            }
        }
        let current = self.vars.fetch(&ident).coerce_to_expression_type();
        let value = Operation::sum(current, Val::Single(step))?;
        self.vars.store(&ident, value)?;
        let value = f32::try_from(self.vars.fetch(&ident))?;
        if (step >= 0.0 && value <= limit) || (step < 0.0 && value >= limit) {
            let single_line = self.index == start;
            if let Some(f) = self.fors.last_mut() {
                f.single_line = single_line;
            }
            if single_line {
                Ok(Control::Jump(start))
            } else {
                Ok(Control::Jump(start + 1))
            }
        } else {
            self.fors.pop();
            Ok(Control::Continue)
        }
    }

    fn r#input(&mut self, prompt: Option<&str>, vars: &[Variable]) -> Result<Control> {
        if let Some(prompt) = prompt {
            self.io.print(prompt)?;
        }
        'retry: loop {
            let mut values: VecDeque<String> = VecDeque::new();
            for var in vars {
                if values.is_empty() {
                    self.io.print("? ")?;
                    let line = self.io.read_line()?;
                    values = line.split(',').map(|s| s.to_string()).collect();
                }
                let text = values.pop_front().unwrap_or_default();
                match Val::try_parse(var.ident().var_type(), &text) {
                    Some(val) => self.store(var, val)?,
                    None => {
                        self.io.print("!NUMBER EXPECTED - RETRY INPUT LINE\n")?;
                        continue 'retry;
                    }
                }
            }
            return Ok(Control::Continue);
        }
    }

    fn r#print(&mut self, items: &[PrintItem]) -> Result<Control> {
        for item in items {
            match item {
                PrintItem::Expression(expr) => {
                    let val = self.eval(expr)?;
                    self.io.print(&val.to_print_string())?;
                }
                PrintItem::Zone(_) => {
                    let pad = ZONE_WIDTH - self.io.column() % ZONE_WIDTH;
                    self.io.print(&" ".repeat(pad))?;
                }
                PrintItem::Empty(_) => {}
            }
        }
        match items.last() {
            Some(PrintItem::Zone(_)) | Some(PrintItem::Empty(_)) => {}
            _ => self.io.print("\n")?,
        }
        Ok(Control::Continue)
    }

    fn r#randomize(&mut self, seed: Option<&Expression>) -> Result<Control> {
        match seed {
            Some(expr) => {
                let n = self.eval_number(expr)?.trunc();
                self.rnd.reseed(n as i64 as u64);
            }
            None => self.rnd.reseed_from_clock(),
        }
        Ok(Control::Continue)
    }

    fn r#read(&mut self, vars: &[Variable]) -> Result<Control> {
        for var in vars {
            let text = self.io.read_data()?;
            match Val::try_parse(var.ident().var_type(), text) {
                Some(val) => self.store(var, val)?,
                None => return Err(error!(TypeMismatch; "EXPECTED NUMBER IN DATA")),
            }
        }
        Ok(Control::Continue)
    }

    fn r#restore(&mut self, label: Option<LineNumber>) -> Result<Control> {
        let program = self.program;
        match label {
            None => self.io.restore_data(None),
            Some(label) => match program.data_for(label) {
                Some(data) => self.io.restore_data(Some(data)),
                None => return Err(error!(BadRestoreTarget)),
            },
        }
        Ok(Control::Continue)
    }

    fn store(&mut self, var: &Variable, val: Val) -> Result<()> {
        match var {
            Variable::Unary(col, ident) => self.vars.store(ident, val).map_err(|e| e.in_column(col)),
            Variable::Array(col, ident, indices) => {
                let indices = self.eval_list(indices)?;
                self.vars
                    .store_array(ident, indices, val)
                    .map_err(|e| e.in_column(col))
            }
        }
    }

    fn eval_list(&mut self, exprs: &[Expression]) -> Result<Vec<Val>> {
        let mut vals = Vec::with_capacity(exprs.len());
        for expr in exprs {
            vals.push(self.eval(expr)?);
        }
        Ok(vals)
    }

    fn eval_number(&mut self, expr: &Expression) -> Result<f32> {
        let val = self.eval(expr)?;
        f32::try_from(val).map_err(|e| e.in_column(&expr.column()))
    }

    fn eval(&mut self, expr: &Expression) -> Result<Val> {
        use Expression::*;
        match expr {
            Number(_, n) => Ok(Val::Single(*n)),
            String(_, s) => Ok(Val::String(s.clone())),
            Var(_, ident) => Ok(self.vars.fetch(ident).coerce_to_expression_type()),
            Array(col, ident, indices) => {
                let indices = self.eval_list(indices)?;
                match self.vars.fetch_array(ident, indices) {
                    Ok(val) => Ok(val.coerce_to_expression_type()),
                    Err(e) => Err(e.in_column(col)),
                }
            }
            Builtin(col, builtin, args) => {
                let args = self.eval_list(args)?;
                self.builtin(*builtin, args).map_err(|e| e.in_column(col))
            }
            UserFn(col, name, args) => {
                let args = self.eval_list(args)?;
                self.user_fn(name, args).map_err(|e| e.in_column(col))
            }
            Negation(col, expr) => {
                let val = self.eval(expr)?;
                Operation::negate(val).map_err(|e| e.in_column(col))
            }
            Not(col, expr) => {
                let val = self.eval(expr)?;
                Operation::not(val).map_err(|e| e.in_column(col))
            }
            Power(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::power),
            Multiply(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::multiply),
            Divide(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::divide),
            Add(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::sum),
            Subtract(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::subtract),
            Equal(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::equal),
            NotEqual(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::not_equal),
            Less(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::less),
            LessEqual(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::less_equal),
            Greater(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::greater),
            GreaterEqual(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::greater_equal),
            And(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::and),
            Or(col, lhs, rhs) => self.binary(col, lhs, rhs, Operation::or),
        }
    }

    fn binary(
        &mut self,
        col: &crate::lang::Column,
        lhs: &Expression,
        rhs: &Expression,
        op: fn(Val, Val) -> Result<Val>,
    ) -> Result<Val> {
        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;
        op(lhs, rhs).map_err(|e| e.in_column(col))
    }

    fn builtin(&mut self, builtin: Builtin, args: Vec<Val>) -> Result<Val> {
        match builtin {
            Builtin::Rnd => {
                Function::check(builtin, &args)?;
                let arg = match args.into_iter().next() {
                    Some(val) => Some(f32::try_from(val)?),
                    None => None,
                };
                Ok(Val::Single(self.rnd.next(arg)))
            }
            Builtin::Tab => {
                Function::check(builtin, &args)?;
                let arg = args.into_iter().next().unwrap_or_default();
                Function::tab(arg, self.io.column())
            }
            _ => Function::call(builtin, args),
        }
    }

    /// Parameters shadow same-named scalars for the duration of the call.
    fn user_fn(&mut self, name: &Ident, args: Vec<Val>) -> Result<Val> {
        let function = self.defs.get(name)?;
        if args.len() != function.params.len() {
            return Err(error!(WrongNumberOfArguments));
        }
        if self.depth >= self.depth_limit {
            return Err(error!(RuntimeError; "FUNCTION NESTING TOO DEEP"));
        }
        let saved: Vec<Val> = function.params.iter().map(|p| self.vars.fetch(p)).collect();
        let mut bound = Ok(());
        for (param, arg) in function.params.iter().zip(args) {
            bound = self.vars.store(param, arg);
            if bound.is_err() {
                break;
            }
        }
        self.depth += 1;
        let result = match bound {
            Ok(()) => self.eval(&function.body),
            Err(e) => Err(e),
        };
        self.depth -= 1;
        for (param, val) in function.params.iter().zip(saved) {
            self.vars.store(param, val)?;
        }
        Ok(result?.coerce_to(name.var_type())?.coerce_to_expression_type())
    }
}
