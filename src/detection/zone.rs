//! 区域判定 (Zone membership test)
//!
//! 兴趣区域 (AOI) 多边形, 整数坐标精确计算 (i128, 不溢出), 边界上的点视为在区域内。

use super::types::Centroid;
use crate::error::{Error, Result};

/// 兴趣区域多边形
///
/// 顶点按顺时针或逆时针顺序排列, 运行期间固定不变。
/// 自相交多边形不做校验, 自相交处的判定结果未定义。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    vertices: Vec<[i32; 2]>,
}

impl Zone {
    /// 创建区域
    ///
    /// 顶点少于3个或所有顶点共线 (面积为零) 时返回 [`Error::InvalidZone`]
    pub fn new(vertices: Vec<[i32; 2]>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::InvalidZone(format!(
                "need at least 3 vertices, got {}",
                vertices.len()
            )));
        }

        let zone = Self { vertices };
        if zone.doubled_area() == 0 {
            return Err(Error::InvalidZone(
                "vertices are collinear (zero area)".to_string(),
            ));
        }
        Ok(zone)
    }

    pub fn vertices(&self) -> &[[i32; 2]] {
        &self.vertices
    }

    /// 判断点是否在区域内 (含边界)
    ///
    /// 先检测是否落在某条边上, 再用射线法 (ray casting) 统计穿越次数
    pub fn contains(&self, point: Centroid) -> bool {
        let (x, y) = (point.x as i128, point.y as i128);
        let n = self.vertices.len();

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (self.vertices[i][0] as i128, self.vertices[i][1] as i128);
            let (xj, yj) = (self.vertices[j][0] as i128, self.vertices[j][1] as i128);

            if on_segment((x, y), (xi, yi), (xj, yj)) {
                return true;
            }

            // 水平射线向 +x 方向, 边跨越 y 时比较交点横坐标 (乘以 dy 避免除法)
            if (yi > y) != (yj > y) {
                let dy = yj - yi;
                let lhs = (x - xi) * dy;
                let rhs = (y - yi) * (xj - xi);
                let crosses = if dy > 0 { lhs < rhs } else { lhs > rhs };
                if crosses {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// 有向面积的两倍 (鞋带公式)
    fn doubled_area(&self) -> i128 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let [x1, y1] = self.vertices[i];
                let [x2, y2] = self.vertices[(i + 1) % n];
                x1 as i128 * y2 as i128 - x2 as i128 * y1 as i128
            })
            .sum()
    }
}

fn on_segment(p: (i128, i128), a: (i128, i128), b: (i128, i128)) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    cross == 0
        && p.0 >= a.0.min(b.0)
        && p.0 <= a.0.max(b.0)
        && p.1 >= a.1.min(b.1)
        && p.1 <= a.1.max(b.1)
}
