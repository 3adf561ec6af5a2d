use std::rc::Rc;

/// 可求值的一元函數。
///
/// 解析函數、函數組合以及兩種表格函數都實作這個 trait，
/// 使用端不需要知道背後是哪一種。
///
/// 定義域外的求值不是錯誤：回傳 `f64::NAN`。
pub trait Function {
    fn left_domain_border(&self) -> f64;

    fn right_domain_border(&self) -> f64;

    fn value(&self, x: f64) -> f64;

    fn in_domain(&self, x: f64) -> bool {
        x >= self.left_domain_border() && x <= self.right_domain_border()
    }
}

impl<F: Function + ?Sized> Function for &F {
    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }
}

impl<F: Function + ?Sized> Function for Box<F> {
    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }
}

impl<F: Function + ?Sized> Function for Rc<F> {
    fn left_domain_border(&self) -> f64 {
        (**self).left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        (**self).right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        (**self).value(x)
    }
}
