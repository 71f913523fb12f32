//! 图生成器
//!
//! 随机树（随机游走生成树）以及路径、星、圈、完全图等常见族

use crate::error::Result;
use crate::graph::{Graph, VertexId};
use rand::Rng;
use std::collections::HashSet;
use tracing::info;

/// 随机树生成结果
#[derive(Debug, Clone)]
pub struct RandomTree {
    /// 新加入的顶点（加入顺序）
    pub vertices: Vec<VertexId>,
    /// 随机游走覆盖全部顶点所用的步数
    pub cover_steps: u64,
}

/// 在图中加入 `order` 个新顶点，并用随机游走在它们之间连出一棵生成树
///
/// 游走每次等概率跳到任一新顶点；第一次到达某顶点时，把上一步所在顶点与之相连。
pub fn random_tree<R: Rng + ?Sized>(graph: &mut Graph, order: usize, rng: &mut R) -> Result<RandomTree> {
    let vertices: Vec<VertexId> = (0..order).map(|_| graph.create_vertex("")).collect();
    if order == 0 {
        return Ok(RandomTree {
            vertices,
            cover_steps: 0,
        });
    }

    let mut visited = HashSet::with_capacity(order);
    let mut current = vertices[rng.gen_range(0..order)];
    visited.insert(current);

    let mut steps = 0u64;
    while visited.len() < order {
        steps += 1;
        let next = vertices[rng.gen_range(0..order)];
        if visited.insert(next) {
            graph.add_edge((current, next), "")?;
        }
        current = next;
    }

    info!(order, cover_steps = steps, "随机树生成完成");
    Ok(RandomTree {
        vertices,
        cover_steps: steps,
    })
}

/// 路径 P_n
pub fn path(graph: &mut Graph, n: usize) -> Result<Vec<VertexId>> {
    let vertices: Vec<VertexId> = (0..n).map(|_| graph.create_vertex("")).collect();
    for pair in vertices.windows(2) {
        graph.add_edge((pair[0], pair[1]), "")?;
    }
    Ok(vertices)
}

/// 星 K_{1,n}：第一个顶点为中心
pub fn star(graph: &mut Graph, leaves: usize) -> Result<Vec<VertexId>> {
    let center = graph.create_vertex("");
    let mut vertices = vec![center];
    for _ in 0..leaves {
        let leaf = graph.create_vertex("");
        graph.add_edge((center, leaf), "")?;
        vertices.push(leaf);
    }
    Ok(vertices)
}

/// 圈 C_n；n < 3 时退化为路径
pub fn cycle(graph: &mut Graph, n: usize) -> Result<Vec<VertexId>> {
    let vertices = path(graph, n)?;
    if n >= 3 {
        graph.add_edge((vertices[n - 1], vertices[0]), "")?;
    }
    Ok(vertices)
}

/// 完全图 K_n
pub fn complete(graph: &mut Graph, n: usize) -> Result<Vec<VertexId>> {
    let vertices: Vec<VertexId> = (0..n).map(|_| graph.create_vertex("")).collect();
    for i in 0..n {
        for j in (i + 1)..n {
            graph.add_edge((vertices[i], vertices[j]), "")?;
        }
    }
    Ok(vertices)
}
