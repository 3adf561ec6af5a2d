use std::fmt;

use log::trace;
use serde::{
    Deserialize,
    Serialize
};

use crate::math::function::function::Function;
use crate::math::function::tabulated::functionpoint::FunctionPoint;
use crate::math::function::tabulated::tabulatedfunction::{
    check_deletable,
    check_index,
    check_order,
    fmt_points,
    validate_points,
    TabulatedFunction,
    TabulatedFunctionRecord
};
use crate::math::function::tabulated::tabulatedfunctionerror::TabulatedFunctionError;

/// 哨兵節點在 arena 中的位置，建立時保留、永不釋放。
const HEAD: usize = 0;

#[derive(Debug, Clone)]
struct FunctionNode {
    point: FunctionPoint,
    next: usize,
    prev: usize
}

/// 以環狀雙向鏈結串列儲存取樣點的表格函數。
///
/// # 設計說明：arena + 索引
/// 節點放在 `Vec<FunctionNode>` 裡，`next` / `prev` 是 arena 索引而不是指標，
/// 避免環狀的所有權問題，同時保留 O(1) 的接合與移除。
/// 索引 0 是哨兵：不帶資料、不計入點數，`HEAD.next` 是第一個點、`HEAD.prev` 是最後一個點。
/// 被刪除的節點位置放進 `free`，之後新增時重複使用。
///
/// 依索引存取需要從第一個點往後走 k 步，沒有隨機存取。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "TabulatedFunctionRecord", try_from = "TabulatedFunctionRecord")]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<FunctionNode>,
    free: Vec<usize>,
    points_count: usize
}

impl LinkedListTabulatedFunction {
    fn empty(capacity: usize) -> LinkedListTabulatedFunction {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(FunctionNode {
            point: FunctionPoint::default(),
            next: HEAD,
            prev: HEAD
        });
        LinkedListTabulatedFunction { nodes, free: Vec::new(), points_count: 0 }
    }

    fn allocate_node(&mut self, point: FunctionPoint) -> usize {
        let node = FunctionNode { point, next: HEAD, prev: HEAD };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            },
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// 把新節點接在 `position` 之前；`position == HEAD` 即接在尾端。
    fn splice_before(&mut self, position: usize, point: FunctionPoint) {
        let node = self.allocate_node(point);
        let prev = self.nodes[position].prev;
        self.nodes[node].next = position;
        self.nodes[node].prev = prev;
        self.nodes[prev].next = node;
        self.nodes[position].prev = node;
        self.points_count += 1;
    }

    fn add_node_to_tail(&mut self, point: FunctionPoint) {
        self.splice_before(HEAD, point);
    }

    fn unlink(&mut self, node: usize) -> FunctionPoint {
        let FunctionNode { point, next, prev } = self.nodes[node].clone();
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(node);
        self.points_count -= 1;
        point
    }

    fn node_by_index(&self, index: usize) -> Result<usize, TabulatedFunctionError> {
        check_index(index, self.points_count)?;
        let mut node = self.nodes[HEAD].next;
        for _ in 0..index {
            node = self.nodes[node].next;
        }
        Ok(node)
    }

    fn first(&self) -> &FunctionPoint {
        &self.nodes[self.nodes[HEAD].next].point
    }

    fn last(&self) -> &FunctionPoint {
        &self.nodes[self.nodes[HEAD].prev].point
    }

    fn iter(&self) -> PointIter<'_> {
        PointIter { function: self, node: self.nodes[HEAD].next }
    }
}

/// 從第一個點走到哨兵為止。
struct PointIter<'a> {
    function: &'a LinkedListTabulatedFunction,
    node: usize
}

impl<'a> Iterator for PointIter<'a> {
    type Item = &'a FunctionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.node == HEAD {
            return None;
        }
        let node = &self.function.nodes[self.node];
        self.node = node.next;
        Some(&node.point)
    }
}

impl Function for LinkedListTabulatedFunction {
    fn left_domain_border(&self) -> f64 {
        self.first().x()
    }

    fn right_domain_border(&self) -> f64 {
        self.last().x()
    }

    fn value(&self, x: f64) -> f64 {
        if !self.in_domain(x) {
            return f64::NAN;
        }
        let mut node = self.nodes[HEAD].next;
        while self.nodes[node].next != HEAD {
            let lhs_pt = &self.nodes[node].point;
            let rhs_pt = &self.nodes[self.nodes[node].next].point;
            if x >= lhs_pt.x() && x <= rhs_pt.x() {
                return FunctionPoint::interpolate(lhs_pt, rhs_pt, x);
            }
            node = self.nodes[node].next;
        }
        f64::NAN
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn points_count(&self) -> usize {
        self.points_count
    }

    fn point(&self, index: usize) -> Result<FunctionPoint, TabulatedFunctionError> {
        let node = self.node_by_index(index)?;
        Ok(self.nodes[node].point)
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), TabulatedFunctionError> {
        let node = self.node_by_index(index)?;
        let next = self.nodes[node].next;
        let prev = self.nodes[node].prev;
        let prev_x = (prev != HEAD).then(|| self.nodes[prev].point.x());
        let next_x = (next != HEAD).then(|| self.nodes[next].point.x());
        check_order(index, point.x(), prev_x, next_x)?;
        trace!("set point {} to {}", index, point);
        self.nodes[node].point = point;
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        let node = self.node_by_index(index)?;
        self.nodes[node].point.set_y(y);
        Ok(())
    }

    /// 一次走訪同時找出插入位置並檢查重複。
    fn add_point(&mut self, point: FunctionPoint) -> Result<(), TabulatedFunctionError> {
        let x = point.x();
        if x.is_nan() {
            return Err(TabulatedFunctionError::OrderViolation { index: self.points_count, x });
        }
        let mut node = self.nodes[HEAD].next;
        while node != HEAD {
            let node_x = self.nodes[node].point.x();
            if FunctionPoint::coincides(node_x, x) {
                return Err(TabulatedFunctionError::DuplicateAbscissa { x });
            }
            if node_x > x {
                break;
            }
            node = self.nodes[node].next;
        }
        trace!("insert {}", point);
        self.splice_before(node, point);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        check_deletable(index, self.points_count)?;
        let node = self.node_by_index(index)?;
        let removed = self.unlink(node);
        trace!("removed {} from index {}", removed, index);
        Ok(())
    }

    fn points(&self) -> Vec<FunctionPoint> {
        self.iter().copied().collect()
    }

    fn from_points(points: Vec<FunctionPoint>) -> Result<Self, TabulatedFunctionError> {
        let points = validate_points(points)?;
        let mut function = LinkedListTabulatedFunction::empty(points.len());
        for point in points {
            function.add_node_to_tail(point);
        }
        Ok(function)
    }

    fn from_tabulated(function: &dyn TabulatedFunction) -> Self {
        let points = function.points();
        let mut copy = LinkedListTabulatedFunction::empty(points.len());
        for point in points {
            copy.add_node_to_tail(point);
        }
        copy
    }
}

/// 只比較點的序列，不比較 arena 的排列。
impl PartialEq for LinkedListTabulatedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.points_count == other.points_count && self.iter().eq(other.iter())
    }
}

impl From<LinkedListTabulatedFunction> for TabulatedFunctionRecord {
    fn from(function: LinkedListTabulatedFunction) -> Self {
        TabulatedFunctionRecord { points: function.points() }
    }
}

impl TryFrom<TabulatedFunctionRecord> for LinkedListTabulatedFunction {
    type Error = TabulatedFunctionError;

    fn try_from(record: TabulatedFunctionRecord) -> Result<Self, Self::Error> {
        LinkedListTabulatedFunction::from_points(record.points)
    }
}

impl fmt::Display for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_points(f, self.iter())
    }
}
