//! Syntax feature detection over a parsed program
//!
//! The parser accepts the latest grammar, so edition checks happen here: the
//! detector walks the AST and records every construct whose edition is newer
//! than the target.

use crate::models::syntax::{EcmaVersion, SyntaxFeature};
use oxc_ast::ast::*;
use oxc_ast_visit::{walk, Visit};
use oxc_span::{GetSpan, Span};
use oxc_syntax::operator::{AssignmentOperator, BinaryOperator, LogicalOperator};
use oxc_syntax::scope::ScopeFlags;

/// A disallowed feature and the byte offset where it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureUse {
    pub feature: SyntaxFeature,
    pub offset: u32,
}

/// Visitor collecting features not allowed in a target edition
pub struct FeatureDetector<'s> {
    source_text: &'s str,
    target: EcmaVersion,
    found: Vec<FeatureUse>,
}

impl<'s> FeatureDetector<'s> {
    /// Disallowed features of `program`, ordered by position
    pub fn detect(program: &Program<'_>, source_text: &'s str, target: EcmaVersion) -> Vec<FeatureUse> {
        let mut detector = Self {
            source_text,
            target,
            found: Vec::new(),
        };

        if let Some(hashbang) = &program.hashbang {
            detector.record(SyntaxFeature::Hashbang, hashbang.span);
        }
        detector.visit_program(program);

        detector.found.sort_by_key(|usage| usage.offset);
        detector.found
    }

    fn record(&mut self, feature: SyntaxFeature, span: Span) {
        if feature.allowed_in(self.target) {
            return;
        }
        self.found.push(FeatureUse {
            feature,
            offset: span.start,
        });
    }

    fn raw(&self, span: Span) -> &'s str {
        self.source_text
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    /// Record a comma that directly follows the last element of a list
    fn check_trailing_comma(&mut self, last_end: u32) {
        let after = self.source_text.get(last_end as usize..).unwrap_or_default();
        if let Some(offset) = leading_comma(after) {
            let start = last_end + offset as u32;
            self.record(SyntaxFeature::TrailingComma, Span::new(start, start + 1));
        }
    }

    fn check_identifier(&mut self, span: Span) {
        if has_code_point_escape(self.raw(span)) {
            self.record(SyntaxFeature::CodePointEscape, span);
        }
    }
}

/// Whether `raw` holds a `\u{...}` escape, skipping escaped backslashes
fn has_code_point_escape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            if bytes.get(i + 1) == Some(&b'u') && bytes.get(i + 2) == Some(&b'{') {
                return true;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    false
}

/// Offset of a `,` that is the first token of `text`, skipping whitespace and comments
fn leading_comma(text: &str) -> Option<usize> {
    let mut pos = 0;
    loop {
        let rest = &text[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();

        if let Some(after) = trimmed.strip_prefix("//") {
            pos += 2 + after.find('\n').unwrap_or(after.len());
        } else if let Some(after) = trimmed.strip_prefix("/*") {
            pos += 2 + after.find("*/").map(|idx| idx + 2).unwrap_or(after.len());
        } else {
            return trimmed.starts_with(',').then_some(pos);
        }
    }
}

/// Offsets of the first named group and the first lookbehind in a regex body
fn regex_group_features(body: &str) -> (Option<usize>, Option<usize>) {
    let bytes = body.as_bytes();
    let mut named = None;
    let mut lookbehind = None;
    let mut in_class = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            b'(' if !in_class => {
                let group = &body[i..];
                if group.starts_with("(?<=") || group.starts_with("(?<!") {
                    lookbehind.get_or_insert(i);
                } else if group.starts_with("(?<") {
                    named.get_or_insert(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    (named, lookbehind)
}

impl<'a> Visit<'a> for FeatureDetector<'_> {
    fn visit_variable_declaration(&mut self, it: &VariableDeclaration<'a>) {
        match it.kind {
            VariableDeclarationKind::Var => {}
            VariableDeclarationKind::Let | VariableDeclarationKind::Const => {
                self.record(SyntaxFeature::LetConst, it.span)
            }
            _ => self.record(SyntaxFeature::UsingDeclaration, it.span),
        }
        walk::walk_variable_declaration(self, it);
    }

    fn visit_arrow_function_expression(&mut self, it: &ArrowFunctionExpression<'a>) {
        self.record(SyntaxFeature::ArrowFunction, it.span);
        if it.r#async {
            self.record(SyntaxFeature::AsyncFunction, it.span);
        }
        walk::walk_arrow_function_expression(self, it);
    }

    fn visit_function(&mut self, it: &Function<'a>, flags: ScopeFlags) {
        match (it.r#async, it.generator) {
            (true, true) => self.record(SyntaxFeature::AsyncIteration, it.span),
            (true, false) => self.record(SyntaxFeature::AsyncFunction, it.span),
            (false, true) => self.record(SyntaxFeature::Generator, it.span),
            (false, false) => {}
        }
        walk::walk_function(self, it, flags);
    }

    fn visit_class(&mut self, it: &Class<'a>) {
        self.record(SyntaxFeature::Class, it.span);
        walk::walk_class(self, it);
    }

    fn visit_property_definition(&mut self, it: &PropertyDefinition<'a>) {
        self.record(SyntaxFeature::ClassFields, it.span);
        walk::walk_property_definition(self, it);
    }

    fn visit_private_identifier(&mut self, it: &PrivateIdentifier<'a>) {
        self.record(SyntaxFeature::PrivateName, it.span);
    }

    fn visit_static_block(&mut self, it: &StaticBlock<'a>) {
        self.record(SyntaxFeature::ClassStaticBlock, it.span);
        walk::walk_static_block(self, it);
    }

    fn visit_private_in_expression(&mut self, it: &PrivateInExpression<'a>) {
        self.record(SyntaxFeature::PrivateIn, it.span);
        walk::walk_private_in_expression(self, it);
    }

    fn visit_super(&mut self, it: &Super) {
        self.record(SyntaxFeature::Super, it.span);
    }

    fn visit_meta_property(&mut self, it: &MetaProperty<'a>) {
        if it.meta.name.as_str() == "new" {
            self.record(SyntaxFeature::NewTarget, it.span);
        } else {
            self.record(SyntaxFeature::ImportMeta, it.span);
        }
    }

    fn visit_template_literal(&mut self, it: &TemplateLiteral<'a>) {
        self.record(SyntaxFeature::TemplateLiteral, it.span);
        walk::walk_template_literal(self, it);
    }

    fn visit_tagged_template_expression(&mut self, it: &TaggedTemplateExpression<'a>) {
        self.record(SyntaxFeature::TaggedTemplate, it.span);
        walk::walk_tagged_template_expression(self, it);
    }

    fn visit_spread_element(&mut self, it: &SpreadElement<'a>) {
        self.record(SyntaxFeature::SpreadElement, it.span);
        walk::walk_spread_element(self, it);
    }

    fn visit_object_expression(&mut self, it: &ObjectExpression<'a>) {
        for property in &it.properties {
            match property {
                ObjectPropertyKind::ObjectProperty(prop) => self.visit_object_property(prop),
                ObjectPropertyKind::SpreadProperty(spread) => {
                    self.record(SyntaxFeature::ObjectRestSpread, spread.span);
                    self.visit_expression(&spread.argument);
                }
            }
        }
    }

    fn visit_object_property(&mut self, it: &ObjectProperty<'a>) {
        if it.method {
            self.record(SyntaxFeature::ObjectMethod, it.span);
        }
        if it.shorthand {
            self.record(SyntaxFeature::ShorthandProperty, it.span);
        }
        if it.computed {
            self.record(SyntaxFeature::ComputedProperty, it.span);
        }
        walk::walk_object_property(self, it);
    }

    fn visit_object_pattern(&mut self, it: &ObjectPattern<'a>) {
        self.record(SyntaxFeature::Destructuring, it.span);
        for property in &it.properties {
            self.visit_binding_property(property);
        }
        if let Some(rest) = &it.rest {
            self.record(SyntaxFeature::ObjectRestSpread, rest.span);
            self.visit_binding_pattern(&rest.argument);
        }
    }

    fn visit_array_pattern(&mut self, it: &ArrayPattern<'a>) {
        self.record(SyntaxFeature::Destructuring, it.span);
        walk::walk_array_pattern(self, it);
    }

    fn visit_assignment_pattern(&mut self, it: &AssignmentPattern<'a>) {
        self.record(SyntaxFeature::DefaultValue, it.span);
        walk::walk_assignment_pattern(self, it);
    }

    fn visit_binding_rest_element(&mut self, it: &BindingRestElement<'a>) {
        self.record(SyntaxFeature::RestElement, it.span);
        walk::walk_binding_rest_element(self, it);
    }

    fn visit_array_assignment_target(&mut self, it: &ArrayAssignmentTarget<'a>) {
        self.record(SyntaxFeature::Destructuring, it.span);
        walk::walk_array_assignment_target(self, it);
    }

    fn visit_object_assignment_target(&mut self, it: &ObjectAssignmentTarget<'a>) {
        self.record(SyntaxFeature::Destructuring, it.span);
        if it.rest.is_some() {
            self.record(SyntaxFeature::ObjectRestSpread, it.span);
        }
        walk::walk_object_assignment_target(self, it);
    }

    fn visit_for_of_statement(&mut self, it: &ForOfStatement<'a>) {
        self.record(SyntaxFeature::ForOf, it.span);
        if it.r#await {
            self.record(SyntaxFeature::AsyncIteration, it.span);
        }
        walk::walk_for_of_statement(self, it);
    }

    fn visit_catch_clause(&mut self, it: &CatchClause<'a>) {
        if it.param.is_none() {
            self.record(SyntaxFeature::OptionalCatchBinding, it.span);
        }
        walk::walk_catch_clause(self, it);
    }

    fn visit_binary_expression(&mut self, it: &BinaryExpression<'a>) {
        if it.operator == BinaryOperator::Exponential {
            self.record(SyntaxFeature::ExponentOperator, it.span);
        }
        walk::walk_binary_expression(self, it);
    }

    fn visit_assignment_expression(&mut self, it: &AssignmentExpression<'a>) {
        match it.operator {
            AssignmentOperator::Exponential => self.record(SyntaxFeature::ExponentOperator, it.span),
            AssignmentOperator::LogicalAnd
            | AssignmentOperator::LogicalOr
            | AssignmentOperator::LogicalNullish => self.record(SyntaxFeature::LogicalAssignment, it.span),
            _ => {}
        }
        walk::walk_assignment_expression(self, it);
    }

    fn visit_logical_expression(&mut self, it: &LogicalExpression<'a>) {
        if it.operator == LogicalOperator::Coalesce {
            self.record(SyntaxFeature::NullishCoalescing, it.span);
        }
        walk::walk_logical_expression(self, it);
    }

    fn visit_chain_expression(&mut self, it: &ChainExpression<'a>) {
        self.record(SyntaxFeature::OptionalChaining, it.span);
        walk::walk_chain_expression(self, it);
    }

    fn visit_import_expression(&mut self, it: &ImportExpression<'a>) {
        self.record(SyntaxFeature::DynamicImport, it.span);
        walk::walk_import_expression(self, it);
    }

    fn visit_big_int_literal(&mut self, it: &BigIntLiteral<'a>) {
        self.record(SyntaxFeature::BigInt, it.span);
    }

    fn visit_numeric_literal(&mut self, it: &NumericLiteral<'a>) {
        let raw = self.raw(it.span);
        if raw.contains('_') {
            self.record(SyntaxFeature::NumericSeparator, it.span);
        }
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("0b") || lower.starts_with("0o") {
            self.record(SyntaxFeature::BinaryOctalLiteral, it.span);
        }
    }

    fn visit_string_literal(&mut self, it: &StringLiteral<'a>) {
        if has_code_point_escape(self.raw(it.span)) {
            self.record(SyntaxFeature::CodePointEscape, it.span);
        }
    }

    fn visit_identifier_name(&mut self, it: &IdentifierName<'a>) {
        self.check_identifier(it.span);
    }

    fn visit_identifier_reference(&mut self, it: &IdentifierReference<'a>) {
        self.check_identifier(it.span);
    }

    fn visit_binding_identifier(&mut self, it: &BindingIdentifier<'a>) {
        self.check_identifier(it.span);
    }

    fn visit_label_identifier(&mut self, it: &LabelIdentifier<'a>) {
        self.check_identifier(it.span);
    }

    fn visit_call_expression(&mut self, it: &CallExpression<'a>) {
        if let Some(last) = it.arguments.last() {
            self.check_trailing_comma(last.span().end);
        }
        walk::walk_call_expression(self, it);
    }

    fn visit_new_expression(&mut self, it: &NewExpression<'a>) {
        if let Some(last) = it.arguments.last() {
            self.check_trailing_comma(last.span().end);
        }
        walk::walk_new_expression(self, it);
    }

    fn visit_formal_parameters(&mut self, it: &FormalParameters<'a>) {
        if it.rest.is_none() {
            if let Some(last) = it.items.last() {
                self.check_trailing_comma(last.span.end);
            }
        }
        walk::walk_formal_parameters(self, it);
    }

    fn visit_reg_exp_literal(&mut self, it: &RegExpLiteral<'a>) {
        let raw = self.raw(it.span);
        let flags = raw.rfind('/').map(|idx| &raw[idx + 1..]).unwrap_or_default();

        if flags.contains('u') || flags.contains('y') {
            self.record(SyntaxFeature::RegExpStickyUnicode, it.span);
        }
        if flags.contains('s') {
            self.record(SyntaxFeature::RegExpDotAll, it.span);
        }
        if flags.contains('d') {
            self.record(SyntaxFeature::RegExpIndices, it.span);
        }
        if flags.contains('v') {
            self.record(SyntaxFeature::RegExpUnicodeSets, it.span);
        }

        let body_end = raw.rfind('/').unwrap_or_default();
        let body = raw.get(1..body_end).unwrap_or_default();
        let (named, lookbehind) = regex_group_features(body);
        if let Some(offset) = named {
            let start = it.span.start + 1 + offset as u32;
            self.record(SyntaxFeature::RegExpNamedGroups, Span::new(start, start + 1));
        }
        if let Some(offset) = lookbehind {
            let start = it.span.start + 1 + offset as u32;
            self.record(SyntaxFeature::RegExpLookbehind, Span::new(start, start + 1));
        }
    }

    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        self.record(SyntaxFeature::ModuleSyntax, it.span);
        walk::walk_import_declaration(self, it);
    }

    fn visit_export_named_declaration(&mut self, it: &ExportNamedDeclaration<'a>) {
        self.record(SyntaxFeature::ModuleSyntax, it.span);
        walk::walk_export_named_declaration(self, it);
    }

    fn visit_export_default_declaration(&mut self, it: &ExportDefaultDeclaration<'a>) {
        self.record(SyntaxFeature::ModuleSyntax, it.span);
        walk::walk_export_default_declaration(self, it);
    }

    fn visit_export_all_declaration(&mut self, it: &ExportAllDeclaration<'a>) {
        self.record(SyntaxFeature::ModuleSyntax, it.span);
        walk::walk_export_all_declaration(self, it);
    }
}

/// 1-based line and column of a byte offset
pub fn line_column(source_text: &str, offset: u32) -> (usize, usize) {
    let offset = (offset as usize).min(source_text.len());
    let before = source_text.get(..offset).unwrap_or(source_text);

    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|idx| idx + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;

    (line, column)
}
