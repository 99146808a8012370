/// Product of percentage multipliers, applied once at the end so that
/// modifiers compose multiplicatively without intermediate rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Scale {
    num: i64,
    den: i64,
}

impl Scale {
    pub(crate) const fn unit() -> Self {
        Self { num: 1, den: 1 }
    }

    pub(crate) fn by(&mut self, pct: u32) {
        if pct != 100 {
            self.num *= i64::from(pct);
            self.den *= 100;
        }
    }

    pub(crate) fn of(&self, value: i32) -> i32 {
        (i64::from(value) * self.num / self.den) as i32
    }
}
